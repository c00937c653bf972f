//! Session tests against a mock bridge.

mod helpers;

use helpers::{api_path, bridge_for, fixture, scratch_path};
use hue_bridge::{Credential, ErrorKind, HueBridge, LightAlert, LightEffect, LightState};
use mockito::{Matcher, Server};
use rstest::rstest;
use serde_json::json;

#[test]
fn test_lights_returns_bridge_mapping() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", api_path("lights").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(fixture("lights.json"))
        .create();

    let path = scratch_path("lights_mapping");
    Credential::new(&server.host_with_port(), helpers::USERNAME)
        .save(&path)
        .unwrap();
    let bridge = HueBridge::open(&path).unwrap();

    let lights = bridge.lights().unwrap();
    assert_eq!(
        lights.into_iter().collect::<Vec<_>>(),
        vec![
            (1, "Hue Lamp 1".to_string()),
            (2, "Hallway".to_string()),
            (11, "Kitchen spot".to_string()),
        ]
    );
    mock.assert();
}

#[test]
fn test_get_lights_full_attributes() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", api_path("lights").as_str())
        .with_status(200)
        .with_body(fixture("lights.json"))
        .create();

    let lights = bridge_for(&server).get_lights().unwrap();
    assert_eq!(lights.len(), 3);
    assert_eq!(lights[&2].productid.as_deref(), Some("Philips-LWB010-1-A19DLv4"));
    assert!(!lights[&2].state.on);
    assert_eq!(lights[&11].state.ct, Some(366));
    assert!(!lights[&11].state.reachable);
}

#[test]
fn test_set_light_state_sends_only_given_options() {
    let mut server = Server::new();
    let mock = server
        .mock("PUT", api_path("lights/1/state").as_str())
        .match_body(Matcher::Json(json!({"on": true})))
        .with_status(200)
        .with_body(r#"[{"success": {"/lights/1/state/on": true}}]"#)
        .create();

    let mut state = LightState::new();
    state.on(true);
    bridge_for(&server).set_light_state(1, &state).unwrap();
    mock.assert();
}

#[test]
fn test_set_light_options_by_name() {
    let mut server = Server::new();
    let mock = server
        .mock("PUT", api_path("lights/3/state").as_str())
        .match_body(Matcher::Json(
            json!({"alert": "lselect", "effect": "colorloop", "transitiontime": 20}),
        ))
        .with_status(200)
        .with_body(
            r#"[{"success": {"/lights/3/state/alert": "lselect"}},
                {"success": {"/lights/3/state/effect": "colorloop"}},
                {"success": {"/lights/3/state/transitiontime": 20}}]"#,
        )
        .create();

    bridge_for(&server)
        .set_light_options(
            3,
            [
                ("alert", json!("lselect")),
                ("effect", json!("colorloop")),
                ("transitiontime", json!(20)),
            ],
        )
        .unwrap();
    mock.assert();
}

#[rstest]
#[case("blink", json!(true))]
#[case("bri", json!(0))]
#[case("on", json!("yes"))]
#[case("effect", json!("rainbow"))]
fn test_invalid_option_sends_nothing(#[case] name: &str, #[case] value: serde_json::Value) {
    let mut server = Server::new();
    let mock = server
        .mock("PUT", Matcher::Any)
        .with_status(200)
        .with_body("[]")
        .expect(0)
        .create();

    let err = bridge_for(&server)
        .set_light_options(1, [("on", json!(true)), (name, value)])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    mock.assert();
}

#[test]
fn test_out_of_range_body_sends_nothing() {
    let mut server = Server::new();
    let mock = server
        .mock("PUT", Matcher::Any)
        .with_status(200)
        .with_body("[]")
        .expect(0)
        .create();

    let body = json!({"bri": 0, "ct": 10, "xy": [5.0, -3.0], "strobe": true});
    let options = body.as_object().unwrap().clone();
    let err = bridge_for(&server).set_light_options(1, options).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    mock.assert();
}

#[test]
fn test_bridge_error_payload() {
    let mut server = Server::new();
    let _mock = server
        .mock("PUT", api_path("lights/42/state").as_str())
        .with_status(200)
        .with_body(
            r#"[{"error": {"type": 3, "address": "/lights/42/state", "description": "resource, /lights/42/state, not available"}}]"#,
        )
        .create();

    let err = bridge_for(&server)
        .set_light_state(42, &LightState::from(LightEffect::None))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Bridge);
    assert_eq!(err.bridge_error_type(), Some(3));
}

#[rstest]
#[case(200, fixture("unauthorized_user.json"), ErrorKind::Bridge)]
#[case(200, "not json".to_string(), ErrorKind::Protocol)]
#[case(200, r#"{"1": {"type": "Dimmable light"}}"#.to_string(), ErrorKind::Protocol)]
#[case(200, r#"{"lamp": {"name": "Desk"}}"#.to_string(), ErrorKind::Protocol)]
#[case(503, String::new(), ErrorKind::Network)]
fn test_lights_failures(#[case] status: usize, #[case] body: String, #[case] kind: ErrorKind) {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", api_path("lights").as_str())
        .with_status(status)
        .with_body(body)
        .create();

    let err = bridge_for(&server).lights().unwrap_err();
    assert_eq!(err.kind(), kind);
}

#[test]
fn test_get_light_without_name() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", api_path("lights/5").as_str())
        .with_status(200)
        .with_body(r#"{"type": "Dimmable light", "state": {"on": true}}"#)
        .create();

    let err = bridge_for(&server).get_light(5).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Protocol);
}

#[test]
fn test_unreachable_bridge() {
    // Nothing listens on port 1.
    let bridge =
        HueBridge::from_credential(Credential::new("127.0.0.1:1", helpers::USERNAME)).unwrap();
    let err = bridge.lights().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Network);
}

#[test]
fn test_rename_light() {
    let mut server = Server::new();
    let mock = server
        .mock("PUT", api_path("lights/2").as_str())
        .match_body(Matcher::Json(json!({"name": "Porch"})))
        .with_status(200)
        .with_body(r#"[{"success": {"/lights/2/name": "Porch"}}]"#)
        .create();

    bridge_for(&server).rename_light(2, "Porch").unwrap();
    mock.assert();
}

#[test]
fn test_get_new_lights() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", api_path("lights/new").as_str())
        .with_status(200)
        .with_body(r#"{"7": {"name": "Hue Lamp 7"}, "lastscan": "active"}"#)
        .create();

    let new = bridge_for(&server).get_new_lights().unwrap();
    assert_eq!(new.lights.len(), 1);
    assert_eq!(new.last_scan.as_deref(), Some("active"));
}

#[test]
fn test_configuration_round() {
    let mut server = Server::new();
    let get = server
        .mock("GET", api_path("config").as_str())
        .with_status(200)
        .with_body(r#"{"name": "Philips hue", "zigbeechannel": 15}"#)
        .create();
    let put = server
        .mock("PUT", api_path("config").as_str())
        .match_body(Matcher::Json(json!({"name": "Upstairs"})))
        .with_status(200)
        .with_body(r#"[{"success": {"/config/name": "Upstairs"}}]"#)
        .create();

    let bridge = bridge_for(&server);
    let config = bridge.get_configuration().unwrap();
    assert_eq!(config["zigbeechannel"], 15);
    bridge.set_configuration(&json!({"name": "Upstairs"})).unwrap();

    get.assert();
    put.assert();
}

#[test]
fn test_blink_every_light() {
    let mut server = Server::new();
    let _lights = server
        .mock("GET", api_path("lights").as_str())
        .with_status(200)
        .with_body(fixture("lights.json"))
        .create();
    let alerts = server
        .mock("PUT", Matcher::Regex(r"^/api/[0-9a-f]+/lights/\d+/state$".to_string()))
        .match_body(Matcher::Json(json!({"alert": "lselect"})))
        .with_status(200)
        .with_body(r#"[{"success": {}}]"#)
        .expect(3)
        .create();

    let bridge = bridge_for(&server);
    for id in bridge.lights().unwrap().keys() {
        bridge
            .set_light_state(*id, &LightState::from(LightAlert::LSelect))
            .unwrap();
    }
    alerts.assert();
}
