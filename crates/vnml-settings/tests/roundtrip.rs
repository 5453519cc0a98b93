use vnml_settings::{SettingsDocument, SettingsMapper};

#[derive(Default)]
struct AppSettings {
    launch_count: u32,
    nickname: String,
    api_key: Option<String>,
}

fn mapper() -> SettingsMapper<AppSettings> {
    let mut mapper = SettingsMapper::new();
    mapper
        .field(
            "launchCount",
            |s: &AppSettings| s.launch_count,
            |s, v| s.launch_count = v,
        )
        .default_value(1);
    mapper.field(
        "nickname",
        |s: &AppSettings| s.nickname.clone(),
        |s, v| s.nickname = v,
    );
    mapper
        .optional_field(
            "apiKey",
            |s: &AppSettings| s.api_key.clone(),
            |s, v| s.api_key = Some(v),
        )
        .secure();
    mapper
}

fn rot13(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'a'..='z' => (((c as u8 - b'a' + 13) % 26) + b'a') as char,
            'A'..='Z' => (((c as u8 - b'A' + 13) % 26) + b'A') as char,
            other => other,
        })
        .collect()
}

#[test]
fn settings_round_trip_through_a_file() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");

    let mut writer = mapper();
    writer.on_encrypt(|_, plain| rot13(plain));
    let settings = AppSettings {
        launch_count: 7,
        nickname: "ada".into(),
        api_key: Some("secret".into()),
    };

    // Act
    writer.save_path(&settings, &path);

    let mut reader = mapper();
    reader.on_decrypt(|_, stored| rot13(stored));
    let mut reloaded = AppSettings::default();
    let document = reader.load_path(&mut reloaded, &path);

    // Assert
    assert!(document.is_some());
    assert_eq!(reloaded.launch_count, 7);
    assert_eq!(reloaded.nickname, "ada");
    assert_eq!(reloaded.api_key.as_deref(), Some("secret"));
}

#[test]
fn secure_values_never_hit_the_disk_in_plain_form() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");

    let mut writer = mapper();
    writer.on_encrypt(|_, plain| rot13(plain));
    let settings = AppSettings {
        api_key: Some("secret".into()),
        ..Default::default()
    };

    // Act
    writer.save_path(&settings, &path);

    // Assert
    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(!raw.contains("secret"));
    assert!(raw.contains(&rot13("secret")));

    let document = SettingsDocument::read_from(&path).unwrap();
    let entry = document.find("apiKey").unwrap();
    assert!(entry.secure);
}

#[test]
fn a_default_materialises_when_the_file_lacks_the_field() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let mut document = SettingsDocument::default();
    document.push("nickname", "ada", false);
    document.write_to(&path).unwrap();

    let mut reader = mapper();
    let mut settings = AppSettings::default();

    // Act
    reader.load_path(&mut settings, &path);

    // Assert
    assert_eq!(settings.launch_count, 1);
    assert_eq!(settings.nickname, "ada");
}
