//! User display settings and the category vocabularies derived from them.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Stores the user-configurable app name, remote endpoint, and category lists.
///
/// Serialized with the exact key names of the persisted settings blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub app_name: String,
    pub api_url: String,
    pub auth_token: String,
    pub str_income_items: String,
    pub str_outgo_items: String,
    pub str_tag_items: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: "GAS 家計簿".into(),
            api_url: String::new(),
            auth_token: String::new(),
            str_income_items: "給料, ボーナス, 繰越".into(),
            str_outgo_items: "食費, 趣味, 交通費, 買い物, 交際費, 生活費, 住宅, 通信, 車, 税金"
                .into(),
            str_tag_items: "固定費, カード".into(),
        }
    }
}

impl Settings {
    pub fn income_items(&self) -> Vec<String> {
        derive_income_items(self)
    }

    pub fn outgo_items(&self) -> Vec<String> {
        derive_outgo_items(self)
    }

    pub fn tag_items(&self) -> Vec<String> {
        derive_tag_items(self)
    }

    /// Sets a single field by its persisted key name. Returns `false` for unknown keys.
    pub fn set_field(&mut self, key: &str, value: impl Into<String>) -> bool {
        let slot = match key {
            "appName" => &mut self.app_name,
            "apiUrl" => &mut self.api_url,
            "authToken" => &mut self.auth_token,
            "strIncomeItems" => &mut self.str_income_items,
            "strOutgoItems" => &mut self.str_outgo_items,
            "strTagItems" => &mut self.str_tag_items,
            _ => return false,
        };
        *slot = value.into();
        true
    }

    /// Persisted key names paired with their current values, in declaration order.
    pub fn fields(&self) -> [(&'static str, &str); 6] {
        [
            ("appName", self.app_name.as_str()),
            ("apiUrl", self.api_url.as_str()),
            ("authToken", self.auth_token.as_str()),
            ("strIncomeItems", self.str_income_items.as_str()),
            ("strOutgoItems", self.str_outgo_items.as_str()),
            ("strTagItems", self.str_tag_items.as_str()),
        ]
    }
}

/// A persisted settings blob read back from storage.
///
/// Every field is optional: keys missing from the blob, stored as `null`, or
/// holding a non-string value leave the in-memory value alone when the patch
/// is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    #[serde(deserialize_with = "string_or_skip")]
    pub app_name: Option<String>,
    #[serde(deserialize_with = "string_or_skip")]
    pub api_url: Option<String>,
    #[serde(deserialize_with = "string_or_skip")]
    pub auth_token: Option<String>,
    #[serde(deserialize_with = "string_or_skip")]
    pub str_income_items: Option<String>,
    #[serde(deserialize_with = "string_or_skip")]
    pub str_outgo_items: Option<String>,
    #[serde(deserialize_with = "string_or_skip")]
    pub str_tag_items: Option<String>,
}

fn string_or_skip<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => Ok(Some(text)),
        None | Some(Value::Null) => Ok(None),
        Some(other) => {
            tracing::warn!(value = %other, "ignoring non-string settings value");
            Ok(None)
        }
    }
}

impl SettingsPatch {
    /// Overwrites the fields of `settings` that are present in this patch.
    pub fn apply_to(self, settings: &mut Settings) {
        let pairs = [
            (self.app_name, &mut settings.app_name),
            (self.api_url, &mut settings.api_url),
            (self.auth_token, &mut settings.auth_token),
            (self.str_income_items, &mut settings.str_income_items),
            (self.str_outgo_items, &mut settings.str_outgo_items),
            (self.str_tag_items, &mut settings.str_tag_items),
        ];
        for (value, slot) in pairs {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

/// Splits a comma-separated list, trimming each piece and dropping empty ones.
pub fn create_items(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Income categories.
pub fn derive_income_items(settings: &Settings) -> Vec<String> {
    create_items(&settings.str_income_items)
}

/// Outgo (expense) categories.
pub fn derive_outgo_items(settings: &Settings) -> Vec<String> {
    create_items(&settings.str_outgo_items)
}

/// Tags.
pub fn derive_tag_items(settings: &Settings) -> Vec<String> {
    create_items(&settings.str_tag_items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_items_trims_and_drops_empty_segments() {
        assert_eq!(
            create_items("食費, 趣味, , 交通費"),
            vec!["食費", "趣味", "交通費"]
        );
        assert!(create_items("").is_empty());
        assert!(create_items(" , ,").is_empty());
    }

    #[test]
    fn default_vocabularies_match_the_stock_lists() {
        let settings = Settings::default();
        assert_eq!(settings.income_items(), vec!["給料", "ボーナス", "繰越"]);
        assert_eq!(settings.outgo_items().len(), 10);
        assert_eq!(settings.tag_items(), vec!["固定費", "カード"]);
    }

    #[test]
    fn settings_serialize_with_blob_key_names() {
        let value = serde_json::to_value(Settings::default()).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        let mut expected = vec![
            "apiUrl",
            "appName",
            "authToken",
            "strIncomeItems",
            "strOutgoItems",
            "strTagItems",
        ];
        expected.sort();
        let mut keys = keys;
        keys.sort();
        assert_eq!(keys, expected);
    }

    #[test]
    fn patch_overwrites_only_present_fields() {
        let patch: SettingsPatch =
            serde_json::from_str(r#"{"appName":"My Book","apiUrl":null,"extra":1}"#).unwrap();
        let mut settings = Settings::default();
        patch.apply_to(&mut settings);

        assert_eq!(settings.app_name, "My Book");
        assert_eq!(settings.api_url, "");
        assert_eq!(settings.str_tag_items, Settings::default().str_tag_items);
    }

    #[test]
    fn wrongly_typed_fields_are_skipped_not_fatal() {
        let patch: SettingsPatch = serde_json::from_str(
            r#"{"appName":123,"strTagItems":"旅行","authToken":["x"]}"#,
        )
        .unwrap();
        assert_eq!(patch.app_name, None);
        assert_eq!(patch.auth_token, None);

        let mut settings = Settings::default();
        patch.apply_to(&mut settings);
        assert_eq!(settings.app_name, "GAS 家計簿");
        assert_eq!(settings.tag_items(), vec!["旅行"]);
    }

    #[test]
    fn set_field_rejects_unknown_keys() {
        let mut settings = Settings::default();
        assert!(settings.set_field("strTagItems", "a, b"));
        assert_eq!(settings.tag_items(), vec!["a", "b"]);
        assert!(!settings.set_field("theme", "dark"));
    }
}
