use super::*;

#[test]
fn banner_serializes_optional_link() {
    let banner = Banner {
        id: Uuid::nil(),
        title: "Hipotecas".into(),
        image_url: "https://cdn.example.com/b.png".into(),
        link_url: None,
        placement: "home".into(),
    };
    let json = serde_json::to_value(&banner).expect("serialize");
    assert_eq!(json["link_url"], serde_json::Value::Null);
    assert_eq!(json["placement"], "home");
}

#[test]
fn location_serializes_province() {
    let location = Location { id: Uuid::nil(), name: "Ruzafa".into(), province: "Valencia".into() };
    let json = serde_json::to_value(&location).expect("serialize");
    assert_eq!(json["name"], "Ruzafa");
    assert_eq!(json["province"], "Valencia");
}
