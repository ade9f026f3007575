//! Result shape extracted from an upstream payload for logging

use serde_json::Value;

/// What the first page of an upstream response looks like
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSummary {
    pub total: Option<u64>,
    pub count: usize,
    pub first_title: Option<String>,
    pub first_play_from: Option<String>,
    /// Length of the first item's play address, `None` if the field is absent
    pub first_play_url_len: Option<usize>,
    pub first_fields: Vec<String>,
}

impl ResultSummary {
    pub fn from_json(json: &Value) -> Self {
        // Providers send `total` as either a number or a numeric string
        let total = json.get("total").and_then(|t| match t {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        });

        let list = json
            .get("list")
            .and_then(|l| l.as_array())
            .map(Vec::as_slice)
            .unwrap_or_default();

        let mut summary = Self {
            total,
            count: list.len(),
            ..Default::default()
        };

        if let Some(first) = list.first().and_then(|f| f.as_object()) {
            summary.first_title = first
                .get("vod_name")
                .and_then(|v| v.as_str())
                .map(str::to_string);
            summary.first_play_from = first
                .get("vod_play_from")
                .and_then(|v| v.as_str())
                .map(str::to_string);
            summary.first_play_url_len = first
                .get("vod_play_url")
                .map(|v| v.as_str().map(|s| s.chars().count()).unwrap_or(0));
            summary.first_fields = first.keys().cloned().collect();
        }

        summary
    }

    pub fn has_play_url(&self) -> bool {
        self.first_play_url_len.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detail_payload() {
        let payload = json!({
            "total": 5,
            "list": [
                {"vod_name": "斗罗大陆", "vod_play_from": "ffm3u8", "vod_play_url": "第1集$http://a/1.m3u8"},
                {"vod_name": "other"}
            ]
        });

        let summary = ResultSummary::from_json(&payload);
        assert_eq!(summary.total, Some(5));
        assert_eq!(summary.count, 2);
        assert_eq!(summary.first_title.as_deref(), Some("斗罗大陆"));
        assert_eq!(summary.first_play_from.as_deref(), Some("ffm3u8"));
        assert!(summary.has_play_url());
        assert_eq!(summary.first_fields.len(), 3);
    }

    #[test]
    fn test_list_payload_without_play_url() {
        let payload = json!({"total": "12", "list": [{"vod_name": "x", "vod_id": 7}]});
        let summary = ResultSummary::from_json(&payload);
        assert_eq!(summary.total, Some(12));
        assert!(!summary.has_play_url());
        assert!(summary.first_play_from.is_none());
    }

    #[test]
    fn test_unexpected_shape() {
        let summary = ResultSummary::from_json(&json!({"code": 0, "msg": "none"}));
        assert_eq!(summary, ResultSummary::default());
    }
}
