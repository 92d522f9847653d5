//! Leaderboard: ranked-store contract, an in-memory store, and score submission.
//!
//! Members are stored as `playerName|score|gameMode|date` strings scored by
//! `score`, once under the global key and once under `<key>:<gameMode>`.
//! Rank is `1 + number of strictly higher scores` on the global board.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{error, info, instrument, warn};

use crate::config::LeaderboardCfg;
use crate::error::LeaderboardError;
use crate::modes::ModeId;

pub type Result<T> = std::result::Result<T, LeaderboardError>;

const DELIMITER: char = '|';

/// Sorted-set style store. Implementations may be remote; every call is awaited.
#[async_trait]
pub trait RankedStore: Send + Sync {
  /// Add `member` or update its score.
  async fn add(&self, key: &str, score: f64, member: &str) -> Result<()>;

  /// Up to `n` members, highest score first.
  async fn top(&self, key: &str, n: usize) -> Result<Vec<(String, f64)>>;

  /// Zero-based position of `member` in descending order.
  async fn rev_rank(&self, key: &str, member: &str) -> Result<Option<usize>>;

  /// Number of members scored `>= min`.
  async fn count_at_least(&self, key: &str, min: f64) -> Result<usize>;
}

/// Process-local store with sorted-set semantics.
#[derive(Default)]
pub struct InMemoryRankedStore {
  sets: RwLock<HashMap<String, HashMap<String, f64>>>,
}

impl InMemoryRankedStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Descending by score, ties broken by member descending (reverse lexicographic range).
  fn sorted_desc(set: &HashMap<String, f64>) -> Vec<(String, f64)> {
    let mut members: Vec<(String, f64)> = set.iter().map(|(m, s)| (m.clone(), *s)).collect();
    members.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| b.0.cmp(&a.0)));
    members
  }
}

#[async_trait]
impl RankedStore for InMemoryRankedStore {
  async fn add(&self, key: &str, score: f64, member: &str) -> Result<()> {
    let mut sets = self.sets.write().await;
    sets.entry(key.to_string()).or_default().insert(member.to_string(), score);
    Ok(())
  }

  async fn top(&self, key: &str, n: usize) -> Result<Vec<(String, f64)>> {
    let sets = self.sets.read().await;
    let mut members = sets.get(key).map(Self::sorted_desc).unwrap_or_default();
    members.truncate(n);
    Ok(members)
  }

  async fn rev_rank(&self, key: &str, member: &str) -> Result<Option<usize>> {
    let sets = self.sets.read().await;
    Ok(sets
      .get(key)
      .and_then(|set| Self::sorted_desc(set).iter().position(|(m, _)| m == member)))
  }

  async fn count_at_least(&self, key: &str, min: f64) -> Result<usize> {
    let sets = self.sets.read().await;
    Ok(sets.get(key).map_or(0, |set| set.values().filter(|s| **s >= min).count()))
  }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
  pub player_name: String,
  pub score: u32,
  #[serde(default)]
  pub game_mode: String,
  pub date: String,
}

impl LeaderboardEntry {
  /// `playerName|score|gameMode|date`
  pub fn encode(&self) -> String {
    format!("{}{DELIMITER}{}{DELIMITER}{}{DELIMITER}{}", self.player_name, self.score, self.game_mode, self.date)
  }

  /// Accepts the four-field form and the older `playerName|score|date` form.
  pub fn decode(member: &str) -> Result<Self> {
    let parts: Vec<&str> = member.split(DELIMITER).collect();
    let (player_name, score, game_mode, date) = match parts.as_slice() {
      [name, score, mode, date] => (*name, *score, *mode, *date),
      [name, score, date] => (*name, *score, "", *date),
      _ => return Err(LeaderboardError::Decode(member.to_string())),
    };
    let score = score.parse::<u32>().map_err(|_| LeaderboardError::Decode(member.to_string()))?;
    Ok(Self {
      player_name: player_name.to_string(),
      score,
      game_mode: game_mode.to_string(),
      date: date.to_string(),
    })
  }

  fn validate(&self) -> Result<()> {
    if self.player_name.trim().is_empty() {
      return Err(LeaderboardError::InvalidEntry("player name is empty".into()));
    }
    if !self.game_mode.is_empty() && self.game_mode.parse::<ModeId>().is_err() {
      return Err(LeaderboardError::InvalidEntry(format!("unknown game mode '{}'", self.game_mode)));
    }
    for (field, value) in [("player name", &self.player_name), ("game mode", &self.game_mode), ("date", &self.date)] {
      if value.contains(DELIMITER) {
        return Err(LeaderboardError::InvalidEntry(format!("{field} contains '{DELIMITER}'")));
      }
    }
    Ok(())
  }
}

/// Result of a submission. Failures are reported here, never raised.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOutcome {
  pub success: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub rank: Option<usize>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub placed_in_top: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

impl SubmitOutcome {
  pub fn failed(message: impl Into<String>) -> Self {
    Self { success: false, rank: None, placed_in_top: None, error: Some(message.into()) }
  }

  pub fn rejected(e: &LeaderboardError) -> Self {
    Self::failed(format!("Failed to save score: {e}"))
  }
}

pub fn now_iso8601() -> String {
  Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Clone)]
pub struct Leaderboard {
  store: Arc<dyn RankedStore>,
  key: String,
  top_n: usize,
}

impl Leaderboard {
  pub fn new(store: Arc<dyn RankedStore>, cfg: &LeaderboardCfg) -> Self {
    Self { store, key: cfg.key.clone(), top_n: cfg.top_n }
  }

  fn mode_key(&self, game_mode: &str) -> String {
    format!("{}:{game_mode}", self.key)
  }

  /// Store the entry and report its rank; store failures become `success: false`.
  #[instrument(level = "info", skip(self, entry), fields(player = %entry.player_name, score = entry.score, mode = %entry.game_mode))]
  pub async fn submit(&self, entry: LeaderboardEntry) -> SubmitOutcome {
    match self.try_submit(&entry).await {
      Ok((rank, placed_in_top)) => {
        info!(target: "leaderboard", rank, placed_in_top, "Score saved");
        SubmitOutcome { success: true, rank: Some(rank), placed_in_top: Some(placed_in_top), error: None }
      }
      Err(e) => {
        error!(target: "leaderboard", error = %e, "Failed to save score");
        SubmitOutcome::rejected(&e)
      }
    }
  }

  async fn try_submit(&self, entry: &LeaderboardEntry) -> Result<(usize, bool)> {
    entry.validate()?;
    let member = entry.encode();
    let score = f64::from(entry.score);

    self.store.add(&self.key, score, &member).await?;
    if !entry.game_mode.is_empty() {
      self.store.add(&self.mode_key(&entry.game_mode), score, &member).await?;
    }

    let higher = self.store.count_at_least(&self.key, score + 1.0).await?;
    let position = self.store.rev_rank(&self.key, &member).await?;
    Ok((higher + 1, position.is_some_and(|p| p < self.top_n)))
  }

  /// Best `top_n` entries overall (`None` / `"all"`) or for one mode.
  #[instrument(level = "debug", skip(self))]
  pub async fn top(&self, game_mode: Option<&str>) -> Result<Vec<LeaderboardEntry>> {
    let key = match game_mode {
      None | Some("all") => self.key.clone(),
      Some(mode) => self.mode_key(mode),
    };
    let members = self.store.top(&key, self.top_n).await?;
    Ok(members
      .into_iter()
      .filter_map(|(member, _)| match LeaderboardEntry::decode(&member) {
        Ok(entry) => Some(entry),
        Err(e) => {
          warn!(target: "leaderboard", %key, error = %e, "Skipping undecodable member");
          None
        }
      })
      .collect())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn entry(name: &str, score: u32, mode: &str) -> LeaderboardEntry {
    LeaderboardEntry {
      player_name: name.into(),
      score,
      game_mode: mode.into(),
      date: "2024-05-01T10:00:00.000Z".into(),
    }
  }

  fn board(top_n: usize) -> (Leaderboard, Arc<InMemoryRankedStore>) {
    let store = Arc::new(InMemoryRankedStore::new());
    let cfg = LeaderboardCfg { key: "leaderboard".into(), top_n };
    (Leaderboard::new(store.clone(), &cfg), store)
  }

  struct FailingStore;

  #[async_trait]
  impl RankedStore for FailingStore {
    async fn add(&self, _key: &str, _score: f64, _member: &str) -> Result<()> {
      Err(LeaderboardError::Store("connection refused".into()))
    }
    async fn top(&self, _key: &str, _n: usize) -> Result<Vec<(String, f64)>> {
      Err(LeaderboardError::Store("connection refused".into()))
    }
    async fn rev_rank(&self, _key: &str, _member: &str) -> Result<Option<usize>> {
      Ok(None)
    }
    async fn count_at_least(&self, _key: &str, _min: f64) -> Result<usize> {
      Ok(0)
    }
  }

  #[test]
  fn member_encoding_is_pipe_delimited() {
    let e = entry("ada", 12, "fractions");
    assert_eq!(e.encode(), "ada|12|fractions|2024-05-01T10:00:00.000Z");
    assert_eq!(LeaderboardEntry::decode(&e.encode()).expect("decode"), e);
  }

  #[test]
  fn legacy_three_field_members_decode() {
    let e = LeaderboardEntry::decode("bob|7|2023-01-01").expect("decode");
    assert_eq!(e.game_mode, "");
    assert_eq!(e.score, 7);
    assert!(LeaderboardEntry::decode("bob").is_err());
    assert!(LeaderboardEntry::decode("bob|seven|basic|x").is_err());
  }

  #[tokio::test]
  async fn in_memory_store_orders_descending() {
    let store = InMemoryRankedStore::new();
    store.add("k", 3.0, "a").await.expect("add");
    store.add("k", 9.0, "b").await.expect("add");
    store.add("k", 5.0, "c").await.expect("add");
    store.add("k", 1.0, "a").await.expect("update");

    let top = store.top("k", 2).await.expect("top");
    assert_eq!(top, vec![("b".to_string(), 9.0), ("c".to_string(), 5.0)]);
    assert_eq!(store.rev_rank("k", "a").await.expect("rank"), Some(2));
    assert_eq!(store.rev_rank("k", "zzz").await.expect("rank"), None);
    assert_eq!(store.count_at_least("k", 5.0).await.expect("count"), 2);
    assert_eq!(store.count_at_least("missing", 0.0).await.expect("count"), 0);
  }

  #[tokio::test]
  async fn rank_counts_strictly_higher_scores() {
    let (board, _) = board(10);
    assert_eq!(board.submit(entry("a", 10, "basic")).await.rank, Some(1));
    assert_eq!(board.submit(entry("b", 20, "basic")).await.rank, Some(1));
    assert_eq!(board.submit(entry("c", 10, "advanced")).await.rank, Some(2));
    let outcome = board.submit(entry("d", 5, "basic")).await;
    assert!(outcome.success);
    assert_eq!(outcome.rank, Some(4));
    assert_eq!(outcome.placed_in_top, Some(true));
  }

  #[tokio::test]
  async fn placement_outside_window_is_reported() {
    let (board, _) = board(2);
    board.submit(entry("a", 30, "basic")).await;
    board.submit(entry("b", 20, "basic")).await;
    let outcome = board.submit(entry("c", 10, "basic")).await;
    assert_eq!(outcome.rank, Some(3));
    assert_eq!(outcome.placed_in_top, Some(false));
  }

  #[tokio::test]
  async fn listings_filter_by_mode() {
    let (board, _) = board(10);
    board.submit(entry("a", 10, "basic")).await;
    board.submit(entry("b", 30, "fractions")).await;
    board.submit(entry("c", 20, "basic")).await;

    let all = board.top(None).await.expect("all");
    let names: Vec<&str> = all.iter().map(|e| e.player_name.as_str()).collect();
    assert_eq!(names, vec!["b", "c", "a"]);
    assert_eq!(board.top(Some("all")).await.expect("all").len(), 3);

    let basic = board.top(Some("basic")).await.expect("basic");
    assert_eq!(basic.iter().map(|e| e.score).collect::<Vec<_>>(), vec![20, 10]);
    assert!(board.top(Some("probability")).await.expect("empty").is_empty());
  }

  #[tokio::test]
  async fn undecodable_members_are_skipped() {
    let (board, store) = board(10);
    store.add("leaderboard", 99.0, "garbage").await.expect("add");
    board.submit(entry("a", 1, "basic")).await;
    let all = board.top(None).await.expect("all");
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].player_name, "a");
  }

  #[tokio::test]
  async fn invalid_entries_are_rejected_without_writing() {
    let (board, store) = board(10);
    let outcome = board.submit(entry("   ", 1, "basic")).await;
    assert!(!outcome.success);
    assert!(outcome.error.expect("message").contains("player name is empty"));

    let outcome = board.submit(entry("a|b", 1, "basic")).await;
    assert!(!outcome.success);
    assert!(store.top("leaderboard", 10).await.expect("top").is_empty());
  }

  #[tokio::test]
  async fn only_known_mode_identifiers_get_a_board() {
    let (board, store) = board(10);
    for mode in ["zzz-anything", "all", "Basic", "arithmetic"] {
      let outcome = board.submit(entry("a", 3, mode)).await;
      assert!(!outcome.success, "{mode}");
      assert!(outcome.error.expect("message").contains("unknown game mode"), "{mode}");
      assert!(store.top(&format!("leaderboard:{mode}"), 10).await.expect("top").is_empty());
    }
    assert!(store.top("leaderboard", 10).await.expect("top").is_empty());

    assert!(board.submit(entry("a", 3, "largeNumbers")).await.success);
    assert!(board.submit(entry("b", 2, "")).await.success);
    assert_eq!(board.top(Some("largeNumbers")).await.expect("mode").len(), 1);
    assert_eq!(board.top(None).await.expect("all").len(), 2);
  }

  #[tokio::test]
  async fn store_failures_become_reported_errors() {
    let board = Leaderboard::new(Arc::new(FailingStore), &LeaderboardCfg::default());
    let outcome = board.submit(entry("a", 1, "basic")).await;
    assert_eq!(
      outcome,
      SubmitOutcome {
        success: false,
        rank: None,
        placed_in_top: None,
        error: Some("Failed to save score: ranked store error: connection refused".into()),
      }
    );
    assert!(board.top(None).await.is_err());
  }

  #[test]
  fn timestamps_are_utc_with_millis() {
    let ts = now_iso8601();
    assert!(ts.ends_with('Z'), "{ts}");
    assert_eq!(ts.len(), "2024-05-01T10:00:00.000Z".len());
  }
}
