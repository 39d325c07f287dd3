use crate::fetcher::{FetchError, JsonObject};
use crate::types::{ImageOutcome, MatchRow, SearchResultItem, NO_RESULTS};
use serde_json::Value;

/// 組出圖片的公開網址
///
/// `base` 結尾有沒有 `/` 都一樣；檔名整個當成一段路徑編碼（`/` 也會被編碼）。
pub fn image_url(base: &str, filename: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        urlencoding::encode(filename)
    )
}

/// 取出 `image_results`，缺少或格式不對都當成空陣列
pub fn image_results(body: &JsonObject) -> &[Value] {
    body.get("image_results")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// 把一次搜尋的結果攤平成報表列
///
/// 永遠至少回傳一列：失敗時一列 `ERROR: ...`，沒結果時一列 `NO_RESULTS`。
pub fn flatten_response(
    filename: &str,
    image_url: &str,
    response: &Result<JsonObject, FetchError>,
    max_results: usize,
) -> (ImageOutcome, Vec<MatchRow>) {
    let body = match response {
        Ok(body) => body,
        Err(e) => {
            let message = e.to_string();
            let row = MatchRow::sentinel(filename, image_url, format!("ERROR: {message}"));
            return (ImageOutcome::Failed(message), vec![row]);
        }
    };

    let rows: Vec<MatchRow> = image_results(body)
        .iter()
        .take(max_results)
        .enumerate()
        .map(|(idx, value)| {
            let item = SearchResultItem::from_value(value);
            MatchRow {
                filename: filename.to_string(),
                image_url: image_url.to_string(),
                result_rank: Some(idx + 1),
                result_title: item.title,
                result_link: item.link,
                result_source: item.source,
            }
        })
        .collect();

    if rows.is_empty() {
        let row = MatchRow::sentinel(filename, image_url, NO_RESULTS.to_string());
        return (ImageOutcome::NoResults, vec![row]);
    }

    (ImageOutcome::Matched(rows.len()), rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use serde_json::json;

    const URL: &str = "https://example.com/photos/a.png";

    fn body(value: Value) -> Result<JsonObject, FetchError> {
        match value {
            Value::Object(map) => Ok(map),
            other => panic!("not an object: {other}"),
        }
    }

    fn results(n: usize) -> Value {
        let items: Vec<Value> = (1..=n)
            .map(|i| json!({
                "title": format!("title {i}"),
                "link": format!("https://site{i}.com"),
                "source": format!("site{i}"),
            }))
            .collect();
        json!({ "image_results": items })
    }

    #[test]
    fn test_image_url_trailing_slash() {
        assert_eq!(
            image_url("https://x/photos", "a.png"),
            image_url("https://x/photos/", "a.png")
        );
        assert_eq!(image_url("https://x/photos///", "a.png"), "https://x/photos/a.png");
    }

    #[test]
    fn test_image_url_encodes_filename() {
        assert_eq!(
            image_url("https://x/photos", "my photo #1.jpg"),
            "https://x/photos/my%20photo%20%231.jpg"
        );
        assert_eq!(image_url("https://x", "a/b.png"), "https://x/a%2Fb.png");
        assert_eq!(image_url("https://x", "貓.png"), "https://x/%E8%B2%93.png");
    }

    #[test]
    fn test_truncates_to_max_results() {
        let (outcome, rows) = flatten_response("a.png", URL, &body(results(8)), 5);

        assert_eq!(outcome, ImageOutcome::Matched(5));
        assert_eq!(rows.len(), 5);
        let ranks: Vec<_> = rows.iter().map(|r| r.result_rank).collect();
        assert_eq!(ranks, vec![Some(1), Some(2), Some(3), Some(4), Some(5)]);
        assert_eq!(rows[0].result_title, "title 1");
        assert_eq!(rows[4].result_link, "https://site5.com");
        assert_eq!(rows[4].result_source, "site5");
    }

    #[test]
    fn test_fewer_results_than_max_are_not_padded() {
        let (outcome, rows) = flatten_response("a.png", URL, &body(results(2)), 5);
        assert_eq!(outcome, ImageOutcome::Matched(2));
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.filename == "a.png" && r.image_url == URL));
    }

    #[test]
    fn test_missing_results_is_no_results() {
        let (outcome, rows) = flatten_response("a.png", URL, &body(json!({"search_metadata": {}})), 5);

        assert_eq!(outcome, ImageOutcome::NoResults);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].result_rank, None);
        assert_eq!(rows[0].result_title, NO_RESULTS);
        assert_eq!(rows[0].result_link, "");
        assert_eq!(rows[0].result_source, "");
    }

    #[test]
    fn test_wrong_shape_and_empty_are_no_results() {
        for value in [
            json!({"image_results": []}),
            json!({"image_results": null}),
            json!({"image_results": "oops"}),
            json!({"image_results": {"title": "x"}}),
        ] {
            let (outcome, rows) = flatten_response("a.png", URL, &body(value), 5);
            assert_eq!(outcome, ImageOutcome::NoResults);
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].result_title, NO_RESULTS);
        }
    }

    #[test]
    fn test_zero_max_results_emits_sentinel_only() {
        let (outcome, rows) = flatten_response("a.png", URL, &body(results(3)), 0);
        assert_eq!(outcome, ImageOutcome::NoResults);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].result_title, NO_RESULTS);
    }

    #[test]
    fn test_malformed_entries_default_to_empty() {
        let value = json!({"image_results": [{"title": 1, "link": "l"}, "junk"]});
        let (outcome, rows) = flatten_response("a.png", URL, &body(value), 5);

        assert_eq!(outcome, ImageOutcome::Matched(2));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].result_title, "");
        assert_eq!(rows[0].result_link, "l");
        assert_eq!(rows[1].result_rank, Some(2));
        assert_eq!(rows[1].result_title, "");
    }

    #[test]
    fn test_fetch_error_row() {
        let response = Err(FetchError::Status(StatusCode::BAD_GATEWAY));
        let (outcome, rows) = flatten_response("a.png", URL, &response, 5);

        assert_eq!(outcome, ImageOutcome::Failed("HTTP 502 Bad Gateway".to_string()));
        assert_eq!(rows.len(), 1);
        assert!(rows[0].result_title.starts_with("ERROR:"));
        assert!(rows[0].result_title.contains("502 Bad Gateway"));
        assert_eq!(rows[0].result_rank, None);
        assert_eq!(rows[0].result_link, "");
        assert_eq!(rows[0].result_source, "");
    }

    #[test]
    fn test_outcome_does_not_depend_on_titles() {
        let value = json!({"image_results": [{"title": "NO_RESULTS"}, {"title": "ERROR: nope"}]});
        let (outcome, rows) = flatten_response("a.png", URL, &body(value), 5);

        assert_eq!(outcome, ImageOutcome::Matched(2));
        assert_eq!(rows[0].result_rank, Some(1));
        assert_eq!(rows[0].result_title, NO_RESULTS);
    }
}
