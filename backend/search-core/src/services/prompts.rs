//! Prompt text and optional response schemas, per locale.

use models::{Coordinates, Locale};

use serde_json::{Value, json};

pub const PROBE_PROMPT: &str = "ping";

pub fn search_prompt(query: &str, locale: Locale) -> String {
    match locale {
        Locale::Ja => format!(
            "検索クエリ「{query}」について最新のウェブサイトを探し、要約を付けてJSONで返してください。"
        ),
        Locale::En => format!(
            "Find the most recent web sites about the query \"{query}\" and return them with summaries as JSON."
        ),
    }
}

pub fn search_system_instruction(locale: Locale) -> &'static str {
    match locale {
        Locale::Ja => {
            r#"あなたは検索エンジンとして動作します。
Google Search で正確な結果を探し、次の形式のJSONだけを出力してください。
説明文や [1] のような引用記号は出力しないでください。

{
  "results": [
    { "title": "ページのタイトル", "url": "完全なURL", "summary": "日本語で2〜3文の要約" }
  ]
}"#
        }
        Locale::En => {
            r#"You act as a search engine.
Use Google Search to find accurate results and output only JSON in the shape below.
Do not add commentary or citation markers such as [1].

{
  "results": [
    { "title": "Page title", "url": "Full URL", "summary": "Two or three sentence summary in English" }
  ]
}"#
        }
    }
}

pub fn weather_prompt(coordinates: &Coordinates, locale: Locale) -> String {
    let Coordinates {
        latitude,
        longitude,
    } = coordinates;

    match locale {
        Locale::Ja => format!(
            "緯度:{latitude}, 経度:{longitude} の場所を特定し、現在の天気と気温、今日の最高気温と最低気温を調べてください。"
        ),
        Locale::En => format!(
            "Identify the place at latitude {latitude}, longitude {longitude} and look up its current weather, temperature, and today's high and low."
        ),
    }
}

pub fn weather_system_instruction(locale: Locale) -> &'static str {
    match locale {
        Locale::Ja => {
            r#"あなたは天気情報を返すボットです。
Google Search で与えられた座標の最新の情報を調べてください。
回答は次のJSONだけにし、それ以外の文章や [1] などの引用は含めないでください。

{
  "location": "地名（例: 東京都千代田区）",
  "temp": "現在の気温（例: 20℃）",
  "condition": "天気（例: 晴れ）",
  "high": "最高気温",
  "low": "最低気温",
  "details": "今日のひとことアドバイス"
}"#
        }
        Locale::En => {
            r#"You are a weather bot.
Use Google Search to look up current information for the given coordinates.
Answer with only the JSON below. Do not include any other text or citations such as [1].

{
  "location": "Place name (e.g. Chiyoda, Tokyo)",
  "temp": "Current temperature (e.g. 20℃)",
  "condition": "Conditions (e.g. Sunny)",
  "high": "High temperature",
  "low": "Low temperature",
  "details": "One line of advice for today"
}"#
        }
    }
}

pub fn search_response_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "results": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "title": { "type": "string" },
                        "url": { "type": "string" },
                        "summary": { "type": "string" }
                    },
                    "required": ["title", "url", "summary"]
                }
            }
        },
        "required": ["results"]
    })
}

pub fn weather_response_schema() -> Value {
    let field = json!({ "type": "string" });
    json!({
        "type": "object",
        "properties": {
            "location": field,
            "temp": field,
            "condition": field,
            "high": field,
            "low": field,
            "details": field
        }
    })
}
