//! Random clip selection
//!
//! Picks one qualifying clip from the archive and describes it, with a link
//! that starts playback at the clip's first second.

use std::fmt::Write as _;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};

use crate::dataset::{Clip, Dataset, Delivery, Drs, Video};
use crate::error::{ArchiveError, Result};
use crate::timestamp::{parse_timestamp, TimestampError};

/// Append a `t=<seconds>s` start offset to a video URL
pub fn build_link(base_url: &str, timestamp: &str) -> std::result::Result<String, TimestampError> {
    let seconds = parse_timestamp(timestamp)?;
    let separator = if base_url.contains('?') { '&' } else { '?' };
    Ok(format!("{base_url}{separator}t={seconds}s"))
}

/// A clip that can be served, with everything needed to describe it
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub video: &'a Video,
    pub delivery: &'a Delivery,
    pub clip: &'a Clip,
    pub youtube_url: &'a str,
}

/// Every delivery or review clip with a playable URL and a complete time range.
///
/// Videos without a URL and clips whose start time cannot be parsed are
/// skipped rather than reported.
pub fn collect_candidates(dataset: &Dataset) -> Vec<Candidate<'_>> {
    let mut candidates = Vec::new();
    for video in &dataset.videos {
        let Some(youtube_url) = video.youtube_url.as_deref() else {
            debug!(video = ?video.id, "skipping video without URL");
            continue;
        };
        for delivery in &video.deliveries {
            for clip in &delivery.clips {
                if !clip.kind.is_tracked() {
                    continue;
                }
                let Some((start, _)) = clip.bounds() else {
                    continue;
                };
                if parse_timestamp(start).is_err() {
                    debug!(video = ?video.id, start, "skipping clip with bad start time");
                    continue;
                }
                candidates.push(Candidate {
                    video,
                    delivery,
                    clip,
                    youtube_url,
                });
            }
        }
    }
    candidates
}

/// Choose one candidate uniformly at random
pub fn choose<R: Rng + ?Sized>(candidates: &[Candidate<'_>], rng: &mut R) -> Result<Selection> {
    let candidate = candidates
        .choose(rng)
        .ok_or(ArchiveError::NoQualifyingRecords)?;
    info!(pool = candidates.len(), video = ?candidate.video.id, "selected clip");
    Selection::from_candidate(candidate)
}

/// Pick a clip from the archive, reproducibly when a seed is given
pub fn select_random(dataset: &Dataset, seed: Option<u64>) -> Result<Selection> {
    let candidates = collect_candidates(dataset);
    match seed {
        Some(seed) => choose(&candidates, &mut StdRng::seed_from_u64(seed)),
        None => choose(&candidates, &mut rand::thread_rng()),
    }
}

/// The chosen clip, shaped for output
#[derive(Debug, Clone, Serialize)]
pub struct Selection {
    pub video_id: Option<String>,
    pub youtube_url: String,
    #[serde(rename = "match")]
    pub match_info: MatchSummary,
    pub delivery: DeliverySummary,
    pub clip: ClipSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchSummary {
    pub description: String,
    pub teams: Option<Vec<String>>,
    pub venue: Option<String>,
    pub format: Option<String>,
    pub match_date: Option<String>,
    pub year: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeliverySummary {
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
}

#[derive(Debug, Clone, Serialize)]
pub struct ClipSummary {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub start: Option<String>,
    pub end: Option<String>,
    pub link: String,
    pub tag: Option<String>,
    pub notes: Option<String>,
}

impl Selection {
    fn from_candidate(candidate: &Candidate<'_>) -> Result<Self> {
        let Candidate {
            video,
            delivery,
            clip,
            youtube_url,
        } = *candidate;
        let start = clip.start.as_deref().unwrap_or_default();
        let link = build_link(youtube_url, start)?;
        let m = &video.match_info;

        Ok(Self {
            video_id: video.id.clone(),
            youtube_url: youtube_url.to_string(),
            match_info: MatchSummary {
                description: m.description(),
                teams: m.teams.clone(),
                venue: m.venue.clone(),
                format: m.format.clone(),
                match_date: m.match_date.clone(),
                year: m.year,
            },
            delivery: DeliverySummary {
                id: delivery.id.clone(),
                innings: delivery.innings,
                over: delivery.over,
                ball: delivery.ball,
                team_bowling: delivery.team_bowling.clone(),
                team_batting: delivery.team_batting.clone(),
                bowler: delivery.bowler.clone(),
                batter: delivery.batter.clone(),
                onfield_decision: delivery.onfield_decision.clone(),
                final_decision: delivery.final_decision.clone(),
                drs: delivery.drs.clone(),
            },
            clip: ClipSummary {
                kind: clip.kind.label(),
                start: clip.start.clone(),
                end: clip.end.clone(),
                link,
                tag: clip.tag.clone(),
                notes: clip.notes.clone(),
            },
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Plain-text description for a terminal
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let m = &self.match_info;
        let d = &self.delivery;

        let _ = write!(out, "{}", m.description);
        let context: Vec<String> = [m.format.clone(), m.venue.clone(), m.match_date.clone()]
            .into_iter()
            .flatten()
            .collect();
        if !context.is_empty() {
            let _ = write!(out, " ({})", context.join(", "));
        }
        let _ = writeln!(out);

        let position = match (d.innings, d.over, d.ball) {
            (innings, Some(over), Some(ball)) => {
                let over = format!("over {over}.{ball}");
                match innings {
                    Some(innings) => format!("Innings {innings}, {over}"),
                    None => over,
                }
            }
            (Some(innings), _, _) => format!("Innings {innings}"),
            _ => "Position unknown".to_string(),
        };
        let _ = writeln!(out, "{position}");

        if let (Some(bowler), Some(batter)) = (&d.bowler, &d.batter) {
            let _ = writeln!(out, "{bowler} to {batter}");
        }
        let decision = |value: &Option<String>| value.clone().unwrap_or_else(|| "?".to_string());
        let _ = writeln!(
            out,
            "On-field: {}  Final: {}",
            decision(&d.onfield_decision),
            decision(&d.final_decision)
        );
        if let Some(drs) = &d.drs {
            let _ = writeln!(
                out,
                "DRS: pitching {}, impact {}, wickets {}",
                decision(&drs.pitching),
                decision(&drs.impact),
                decision(&drs.wickets)
            );
        }

        let c = &self.clip;
        let _ = writeln!(
            out,
            "{} clip {}-{}",
            c.kind,
            c.start.as_deref().unwrap_or("?"),
            c.end.as_deref().unwrap_or("?")
        );
        if let Some(tag) = &c.tag {
            let _ = writeln!(out, "Tag: {tag}");
        }
        if let Some(notes) = &c.notes {
            let _ = writeln!(out, "Notes: {notes}");
        }
        let _ = writeln!(out, "Watch: {}", c.link);
        out
    }
}
