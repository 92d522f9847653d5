//! Observable score: a value cell plus change subscribers.
//!
//! Reads are synchronous. Subscribers run inline on every change, so the owner
//! of the session is the only writer.

use std::fmt;

pub type Subscriber = Box<dyn Fn(u32) + Send + Sync>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
pub struct Score {
  value: u32,
  next_id: u64,
  subscribers: Vec<(SubscriptionId, Subscriber)>,
}

impl fmt::Debug for Score {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Score")
      .field("value", &self.value)
      .field("subscribers", &self.subscribers.len())
      .finish()
  }
}

impl Score {
  pub fn get(&self) -> u32 {
    self.value
  }

  /// Register a callback invoked with the new value after each change.
  pub fn subscribe<F>(&mut self, f: F) -> SubscriptionId
  where
    F: Fn(u32) + Send + Sync + 'static,
  {
    let id = SubscriptionId(self.next_id);
    self.next_id += 1;
    self.subscribers.push((id, Box::new(f)));
    id
  }

  /// Returns false when the id was not registered.
  #[cfg_attr(not(test), allow(dead_code))]
  pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
    let before = self.subscribers.len();
    self.subscribers.retain(|(sid, _)| *sid != id);
    self.subscribers.len() != before
  }

  pub fn set(&mut self, value: u32) {
    if self.value == value {
      return;
    }
    self.value = value;
    for (_, notify) in &self.subscribers {
      notify(value);
    }
  }

  pub fn increment(&mut self) {
    self.set(self.value.saturating_add(1));
  }

  pub fn reset(&mut self) {
    self.set(0);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::{Arc, Mutex};

  fn recorder(score: &mut Score) -> (Arc<Mutex<Vec<u32>>>, SubscriptionId) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let id = score.subscribe(move |v| sink.lock().expect("lock").push(v));
    (seen, id)
  }

  #[test]
  fn subscribers_see_each_change() {
    let mut score = Score::default();
    let (seen, _) = recorder(&mut score);
    score.increment();
    score.increment();
    score.reset();
    assert_eq!(score.get(), 0);
    assert_eq!(*seen.lock().expect("lock"), vec![1, 2, 0]);
  }

  #[test]
  fn unchanged_value_does_not_notify() {
    let mut score = Score::default();
    let (seen, _) = recorder(&mut score);
    score.reset();
    score.set(0);
    assert!(seen.lock().expect("lock").is_empty());
  }

  #[test]
  fn unsubscribed_callbacks_stop_firing() {
    let mut score = Score::default();
    let (seen, id) = recorder(&mut score);
    score.increment();
    assert!(score.unsubscribe(id));
    assert!(!score.unsubscribe(id));
    score.increment();
    assert_eq!(*seen.lock().expect("lock"), vec![1]);
    assert_eq!(score.get(), 2);
  }
}
