//! Transport and envelope behaviour of `POST /service`.

use axum::http::StatusCode;
use serde_json::Value;

use super::fixtures::{StubProvider, forecast, post, router, send};

const GREETING_BODY: &str =
    "{\"ExctnOutcomeCode\":200,\"ExctnOutcomeNote\":\"\",\"Yield\":\"Hello world\"}\n";
const UNKNOWN_BODY: &str =
    "{\"ExctnOutcomeCode\":400,\"ExctnOutcomeNote\":\"unknown service code\",\"Yield\":\"\"}\n";
const MISSING_SEED_BODY: &str = "{\"ExctnOutcomeCode\":400,\"ExctnOutcomeNote\":\"missing Seed data for ex02 service\",\"Yield\":null}\n";
const UPSTREAM_FAILURE_BODY: &str = "{\"ExctnOutcomeCode\":500,\"ExctnOutcomeNote\":\"failed to fetch weather data\",\"Yield\":null}\n";

#[tokio::test]
async fn non_post_methods_are_405() {
    for method in ["GET", "PUT", "DELETE", "PATCH"] {
        let provider = StubProvider::ok(forecast(1));
        let reply = send(router(provider.clone()), method, r#"{"Srvc":"ex02"}"#).await;

        assert_eq!(reply.status, StatusCode::METHOD_NOT_ALLOWED, "{method}");
        assert_eq!(reply.body, "only POST allowed\n");
        assert_eq!(
            reply.content_type.as_deref(),
            Some("text/plain; charset=utf-8")
        );
        assert_eq!(provider.calls(), 0);
    }
}

#[tokio::test]
async fn malformed_json_is_400_plain_text() {
    for body in ["", "{", "not json", r#"{"Srvc": 5}"#, r#""sr05""#, r#"{"Srvc":"ex02","Seed":{"lat":"north"}}"#] {
        let reply = post(router(StubProvider::failing()), body).await;
        assert_eq!(reply.status, StatusCode::BAD_REQUEST, "{body:?}");
        assert_eq!(reply.body, "invalid json\n");
    }
}

#[tokio::test]
async fn oversized_body_cannot_be_read() {
    let body = vec![b' '; 3 * 1024 * 1024];
    let reply = send(router(StubProvider::failing()), "POST", body).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body, "cannot read body\n");
}

#[tokio::test]
async fn greeting_is_exact() {
    let reply = post(router(StubProvider::failing()), r#"{"Srvc":"sr05"}"#).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.content_type.as_deref(), Some("application/json"));
    assert_eq!(reply.body, GREETING_BODY);
}

#[tokio::test]
async fn unknown_service_is_exact() {
    for body in [r#"{"Srvc":"zz99"}"#, "{}", r#"{"srvc":"sr05"}"#] {
        let reply = post(router(StubProvider::failing()), body).await;
        assert_eq!(reply.status, StatusCode::OK, "{body}");
        assert_eq!(reply.body, UNKNOWN_BODY, "{body}");
    }
}

#[tokio::test]
async fn null_request_is_an_unknown_service() {
    for body in ["null", r#"{"Srvc":null}"#, r#"{"Srvc":null,"Seed":null}"#] {
        let reply = post(router(StubProvider::failing()), body).await;
        assert_eq!(reply.status, StatusCode::OK, "{body}");
        assert_eq!(reply.body, UNKNOWN_BODY, "{body}");
    }
}

#[tokio::test]
async fn null_coordinates_decode_as_zero() {
    let provider = StubProvider::ok(forecast(2));
    let reply = post(
        router(provider.clone()),
        r#"{"Srvc":"ex02","Seed":{"lat":null,"lon":0,"start":null,"end":null}}"#,
    )
    .await;

    let value: Value = serde_json::from_str(&reply.body).unwrap();
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(value["ExctnOutcomeCode"], 200);
    assert_eq!(provider.calls(), 1);

    let seed = provider.last_seed().unwrap();
    assert_eq!(seed.lat, 0.0);
    assert!(seed.start.is_empty());
}

#[tokio::test]
async fn unknown_request_fields_are_ignored() {
    let reply = post(
        router(StubProvider::failing()),
        r#"{"Srvc":"sr05","Trace":"abc","Seed":{"lat":1.0,"lon":2.0,"zoom":3}}"#,
    )
    .await;
    assert_eq!(reply.body, GREETING_BODY);
}

#[tokio::test]
async fn weather_without_seed_is_exact() {
    let provider = StubProvider::ok(forecast(2));
    let reply = post(router(provider.clone()), r#"{"Srvc":"ex02"}"#).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body, MISSING_SEED_BODY);
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn weather_with_bad_latitude_is_400() {
    let provider = StubProvider::ok(forecast(2));
    let reply = post(
        router(provider.clone()),
        r#"{"Srvc":"ex02","Seed":{"lat":95,"lon":0,"start":"","end":""}}"#,
    )
    .await;

    let value: Value = serde_json::from_str(&reply.body).unwrap();
    assert_eq!(value["ExctnOutcomeCode"], 400);
    assert_eq!(
        value["ExctnOutcomeNote"],
        "invalid latitude or longitude values"
    );
    assert!(value["Yield"].is_null());
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn weather_upstream_failure_is_exact() {
    let provider = StubProvider::failing();
    let reply = post(
        router(provider.clone()),
        r#"{"Srvc":"ex02","Seed":{"lat":52.52,"lon":13.41}}"#,
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body, UPSTREAM_FAILURE_BODY);
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn weather_success_reshapes_every_series() {
    let upstream = forecast(24);
    let provider = StubProvider::ok(upstream.clone());
    let reply = post(
        router(provider.clone()),
        r#"{"Srvc":"ex02","Seed":{"lat":52.52,"lon":13.41,"start":"2026-10-15","end":"2026-10-16"}}"#,
    )
    .await;

    let value: Value = serde_json::from_str(&reply.body).unwrap();
    assert_eq!(value["ExctnOutcomeCode"], 200);
    assert_eq!(value["ExctnOutcomeNote"], "");

    let hourly = &value["Yield"]["hourly"];
    for series in ["time", "temperature", "wind_speed", "wind_direction", "humidity", "weather_code"] {
        assert_eq!(hourly[series].as_array().unwrap().len(), 24, "{series}");
    }
    assert_eq!(hourly["time"][5], upstream.hourly.time[5].as_str());
    assert_eq!(hourly["temperature"][5], upstream.hourly.temperature_2m[5]);
    assert_eq!(hourly["humidity"][23], upstream.hourly.relative_humidity_2m[23]);
    assert_eq!(value["Yield"]["daily"]["date"][0], "2026-10-15");

    let seed = provider.last_seed().unwrap();
    assert_eq!(seed.lat, 52.52);
    assert_eq!(seed.start, "2026-10-15");
}

mod property_tests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// The provider is consulted exactly for in-range coordinates
        #[test]
        fn coordinates_gate_the_provider(lat in -200.0f64..200.0, lon in -400.0f64..400.0) {
            let in_range = (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon);
            let provider = StubProvider::ok(forecast(3));
            let body = format!(r#"{{"Srvc":"ex02","Seed":{{"lat":{lat},"lon":{lon}}}}}"#);

            let reply = tokio_test::block_on(post(router(provider.clone()), &body));
            let value: Value = serde_json::from_str(&reply.body).unwrap();

            let expected = if in_range { 200 } else { 400 };
            prop_assert_eq!(value["ExctnOutcomeCode"].as_u64(), Some(expected));
            prop_assert_eq!(provider.calls(), usize::from(in_range));
        }

        /// N upstream hours come back as N aligned entries
        #[test]
        fn hourly_length_is_preserved(hours in 0usize..72) {
            let reply = tokio_test::block_on(post(
                router(StubProvider::ok(forecast(hours))),
                r#"{"Srvc":"ex02","Seed":{"lat":0,"lon":0}}"#,
            ));
            let value: Value = serde_json::from_str(&reply.body).unwrap();
            let hourly = &value["Yield"]["hourly"];
            for series in ["time", "temperature", "wind_speed", "wind_direction", "humidity", "weather_code"] {
                prop_assert_eq!(hourly[series].as_array().map(Vec::len), Some(hours));
            }
        }
    }
}
