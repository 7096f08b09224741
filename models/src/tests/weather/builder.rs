use crate::{Locale, WeatherInfo, WeatherInfoBuilder};

/// **VALUE**: Verifies that an empty builder produces the full sentinel report.
///
/// **WHY THIS MATTERS**: When the model returns `{}` or nothing at all, the caller
/// still dereferences all six fields. A missing field here is a crash in the UI.
///
/// **BUG THIS CATCHES**: Would catch if any field is left without a fallback.
#[test]
fn given_no_fields_when_building_then_every_field_is_sentinel() {
    // GIVEN: A builder with nothing set
    let builder = WeatherInfoBuilder::default();

    // WHEN: Building in Japanese
    let info = builder.build(Locale::Ja);

    // THEN: Matches the sentinel report exactly
    assert_eq!(info, WeatherInfo::sentinel(Locale::Ja));
    assert_eq!(info.location, "不明な地点");
    assert_eq!(info.temp, "--℃");
    assert_eq!(info.condition, "取得中");
    assert_eq!(info.high, "--℃");
    assert_eq!(info.low, "--℃");
    assert_eq!(info.details, "データの取得に失敗しました。");
}

/// **VALUE**: Verifies fields are backfilled independently.
///
/// **WHY THIS MATTERS**: The model often returns a location and temperature but drops
/// the high/low. Real values must survive while only the gaps are filled.
///
/// **BUG THIS CATCHES**: Would catch an all-or-nothing fallback that discards real data.
#[test]
fn given_partial_fields_when_building_then_only_missing_fields_are_backfilled() {
    // GIVEN: Location and temperature only
    let builder = WeatherInfoBuilder::default()
        .with_location("東京都千代田区")
        .with_temp("20℃");

    // WHEN: Building
    let missing = builder.missing_fields();
    let info = builder.build(Locale::En);

    // THEN: Real values kept, rest are English sentinels
    assert_eq!(missing, vec!["condition", "high", "low", "details"]);
    assert_eq!(info.location, "東京都千代田区");
    assert_eq!(info.temp, "20℃");
    assert_eq!(info.condition, "Unavailable");
    assert_eq!(info.high, "--℃");
}

/// **VALUE**: Verifies that whitespace-only values count as missing.
///
/// **WHY THIS MATTERS**: `"condition": " "` renders as an empty badge; the sentinel is
/// the better answer.
///
/// **BUG THIS CATCHES**: Would catch if the blank check is removed from `with_*`.
#[test]
fn given_blank_value_when_building_then_treated_as_missing() {
    let info = WeatherInfoBuilder::default()
        .with_condition("   ")
        .with_details("  晴れのち曇り  ")
        .build(Locale::Ja);

    assert_eq!(info.condition, "取得中");
    assert_eq!(info.details, "晴れのち曇り");
}
