//! Typed view of an archive document
//!
//! The archive is loaded wholesale as a `serde_json::Value` and then lifted into
//! these records. Lifting never fails: every field access is an explicit
//! present-or-absent branch, and a field with the wrong JSON type is treated as
//! absent. Empty strings are also treated as absent, so downstream code only ever
//! sees `Some` for values it can use.
//!
//! Deliveries come in two shapes. The flat shape carries the ball fields and its
//! `clips` directly:
//!
//! ```json
//! { "innings": 1, "over": 12, "ball": 3, "clips": [ ... ] }
//! ```
//!
//! The grouped shape wraps the ball fields in a `delivery` object and keeps the
//! clips alongside it (or inside it):
//!
//! ```json
//! { "delivery": { "innings": 1, "over": 12, "ball": 3 }, "clips": [ ... ] }
//! ```
//!
//! Both lift to the same [`Delivery`].

use serde::Serialize;
use serde_json::{Map, Value};

/// Root of an archive document
#[derive(Debug, Clone, Default, Serialize)]
pub struct Dataset {
    pub videos: Vec<Video>,
}

/// One source video and the deliveries reviewed in it
#[derive(Debug, Clone, Default, Serialize)]
pub struct Video {
    pub id: Option<String>,
    pub youtube_url: Option<String>,
    #[serde(rename = "match")]
    pub match_info: Match,
    pub deliveries: Vec<Delivery>,
}

/// Match metadata; every field is optional
#[derive(Debug, Clone, Default, Serialize)]
pub struct Match {
    pub teams: Option<Vec<String>>,
    pub venue: Option<String>,
    pub format: Option<String>,
    pub match_date: Option<String>,
    pub year: Option<i64>,
}

/// One ball bowled
#[derive(Debug, Clone, Default, Serialize)]
pub struct Delivery {
    pub id: Option<String>,
    pub innings: Option<i64>,
    pub over: Option<i64>,
    pub ball: Option<i64>,
    pub team_bowling: Option<String>,
    pub team_batting: Option<String>,
    pub bowler: Option<String>,
    pub batter: Option<String>,
    pub onfield_decision: Option<String>,
    pub final_decision: Option<String>,
    pub drs: Option<Drs>,
    pub clips: Vec<Clip>,
}

/// Ball-tracking assessment recorded by a review
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Drs {
    pub pitching: Option<String>,
    pub impact: Option<String>,
    pub wickets: Option<String>,
}

/// Clip categories. Only delivery and review footage is tracked; anything else
/// lands in `Other` and is ignored by statistics and selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipKind {
    Delivery,
    Review,
    Other,
}

impl ClipKind {
    pub fn from_label(label: &str) -> Self {
        match label {
            "delivery" => ClipKind::Delivery,
            "review" => ClipKind::Review,
            _ => ClipKind::Other,
        }
    }

    pub fn is_tracked(&self) -> bool {
        !matches!(self, ClipKind::Other)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ClipKind::Delivery => "delivery",
            ClipKind::Review => "review",
            ClipKind::Other => "other",
        }
    }
}

/// A timestamped segment of the source video
#[derive(Debug, Clone, Serialize)]
pub struct Clip {
    #[serde(rename = "type")]
    pub kind: ClipKind,
    pub start: Option<String>,
    pub end: Option<String>,
    pub tag: Option<String>,
    pub notes: Option<String>,
}

impl Clip {
    /// Both ends present, as required for statistics and selection
    pub fn bounds(&self) -> Option<(&str, &str)> {
        Some((self.start.as_deref()?, self.end.as_deref()?))
    }
}

impl Dataset {
    /// Lift a raw document. Anything that is not an object yields an empty dataset.
    ///
    /// Every entry of `videos` (and of each `deliveries`) becomes a record, so
    /// counts match the array lengths; entries that are not objects lift to
    /// records with every field absent.
    pub fn from_value(document: &Value) -> Self {
        let videos = document
            .get("videos")
            .and_then(Value::as_array)
            .map(|videos| videos.iter().map(Video::from_value).collect())
            .unwrap_or_default();
        Self { videos }
    }

    pub fn delivery_count(&self) -> usize {
        self.videos.iter().map(|v| v.deliveries.len()).sum()
    }
}

impl Video {
    fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };
        Self {
            id: id_field(obj, "id"),
            youtube_url: string_field(obj, "youtube_url"),
            match_info: obj
                .get("match")
                .and_then(Value::as_object)
                .map(Match::from_object)
                .unwrap_or_default(),
            deliveries: array_field(obj, "deliveries")
                .map(Delivery::from_value)
                .collect(),
        }
    }
}

impl Match {
    fn from_object(obj: &Map<String, Value>) -> Self {
        let teams = obj.get("teams").and_then(Value::as_array).map(|teams| {
            teams
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        });
        Self {
            teams,
            venue: string_field(obj, "venue"),
            format: string_field(obj, "format"),
            match_date: string_field(obj, "match_date"),
            year: int_field(obj, "year"),
        }
    }

    /// `"A vs B"` when exactly two teams are recorded
    pub fn description(&self) -> String {
        match self.teams.as_deref() {
            Some([home, away]) => format!("{home} vs {away}"),
            _ => "Unknown teams".to_string(),
        }
    }
}

impl Delivery {
    fn from_value(value: &Value) -> Self {
        let Some(outer) = value.as_object() else {
            return Self::default();
        };
        // Grouped shape: ball fields live under "delivery"
        let fields = match outer.get("delivery").and_then(Value::as_object) {
            Some(inner) => inner,
            None => outer,
        };
        let clip_source = if outer.contains_key("clips") { outer } else { fields };

        Self {
            id: id_field(fields, "id"),
            innings: int_field(fields, "innings"),
            over: int_field(fields, "over"),
            ball: int_field(fields, "ball"),
            team_bowling: string_field(fields, "team_bowling"),
            team_batting: string_field(fields, "team_batting"),
            bowler: string_field(fields, "bowler"),
            batter: string_field(fields, "batter"),
            onfield_decision: string_field(fields, "onfield_decision"),
            final_decision: string_field(fields, "final_decision"),
            drs: fields
                .get("drs")
                .and_then(Value::as_object)
                .map(Drs::from_object),
            clips: array_field(clip_source, "clips")
                .filter_map(Clip::from_value)
                .collect(),
        }
    }
}

impl Drs {
    fn from_object(obj: &Map<String, Value>) -> Self {
        Self {
            pitching: string_field(obj, "pitching"),
            impact: string_field(obj, "impact"),
            wickets: string_field(obj, "wickets"),
        }
    }
}

impl Clip {
    fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let kind = obj
            .get("type")
            .and_then(Value::as_str)
            .map(ClipKind::from_label)
            .unwrap_or(ClipKind::Other);
        Some(Self {
            kind,
            start: string_field(obj, "start"),
            end: string_field(obj, "end"),
            tag: string_field(obj, "tag"),
            notes: string_field(obj, "notes"),
        })
    }
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Identifiers may be written as strings or numbers
fn id_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::Number(n) => Some(n.to_string()),
        other => other.as_str().filter(|s| !s.is_empty()).map(str::to_string),
    }
}

/// Integers may also arrive as numeric strings (`"2019"`)
fn int_field(obj: &Map<String, Value>, key: &str) -> Option<i64> {
    match obj.get(key)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn array_field<'a>(obj: &'a Map<String, Value>, key: &str) -> impl Iterator<Item = &'a Value> {
    obj.get(key)
        .and_then(Value::as_array)
        .map(|items| items.as_slice())
        .unwrap_or_default()
        .iter()
}
