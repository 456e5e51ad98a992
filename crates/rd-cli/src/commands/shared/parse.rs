use chrono::NaiveDate;
use rd_core::enums::TimelineKind;
use rd_core::timeline::TimelineOrderItem;
use serde::de::DeserializeOwned;

/// Parse a `snake_case` enum value using serde-deserialization.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.replace('-', "_");
    let json = format!("\"{normalized}\"");
    serde_json::from_str(&json).map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

/// Parse an optional enum argument.
pub fn parse_enum_opt<T>(raw: Option<&str>, field: &str) -> anyhow::Result<Option<T>>
where
    T: DeserializeOwned,
{
    raw.map(|value| parse_enum(value, field)).transpose()
}

/// Parse a clearable date: `none` or an empty string clears it.
pub fn parse_clearable_date(raw: &str, field: &str) -> anyhow::Result<Option<NaiveDate>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(Some)
        .map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

/// Parse a clearable text value: `none` or an empty string clears it.
pub fn parse_clearable_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parse `kind:id:order`, e.g. `phase:phs-1a2b3c4d:3`.
pub fn parse_order_item(raw: &str) -> anyhow::Result<TimelineOrderItem> {
    let mut parts = raw.splitn(3, ':');
    let (Some(kind), Some(id), Some(order)) = (parts.next(), parts.next(), parts.next()) else {
        anyhow::bail!("invalid timeline item '{raw}': expected kind:id:order");
    };
    let kind: TimelineKind = parse_enum(kind, "timeline kind")?;
    let order = order
        .parse::<i64>()
        .map_err(|error| anyhow::anyhow!("invalid order in '{raw}': {error}"))?;
    Ok(TimelineOrderItem {
        kind,
        id: id.to_string(),
        order,
    })
}
