//! Price display state container — app-owned, SDK-provided update logic.

use super::{FetchError, FetchState, PriceReading};
use crate::shared::Symbol;

/// Live display state for one symbol.
///
/// The app (or the poller) owns an instance of this type; the SDK provides
/// the update methods. Writes are guarded by a request generation: every
/// fetch calls [`begin`](Self::begin) to obtain a generation, and only the
/// completion carrying the **latest issued** generation may update the state.
/// A completion from a superseded fetch, or one arriving after
/// [`close`](Self::close), is dropped — there is no completion-order race.
#[derive(Debug, Clone)]
pub struct PriceDisplayState {
    symbol: Symbol,
    state: FetchState,
    latest_generation: u64,
    closed: bool,
}

impl PriceDisplayState {
    pub fn new(symbol: Symbol) -> Self {
        Self {
            symbol,
            state: FetchState::Loading,
            latest_generation: 0,
            closed: false,
        }
    }

    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Start a new fetch: supersedes any outstanding fetch and moves the
    /// display to `Loading`. Returns the generation to pass to
    /// [`apply`](Self::apply), or `None` if the display was torn down.
    pub fn begin(&mut self) -> Option<u64> {
        if self.closed {
            return None;
        }
        self.latest_generation += 1;
        self.state = FetchState::Loading;
        Some(self.latest_generation)
    }

    /// Complete the fetch identified by `generation`. Returns whether the
    /// state was updated; a stale or post-teardown completion is a no-op.
    pub fn apply(
        &mut self,
        generation: u64,
        outcome: Result<PriceReading, FetchError>,
    ) -> bool {
        if self.closed || generation != self.latest_generation {
            tracing::debug!(
                symbol = %self.symbol,
                generation,
                latest = self.latest_generation,
                closed = self.closed,
                "dropping superseded fetch completion"
            );
            return false;
        }
        self.state = match outcome {
            Ok(reading) => FetchState::Success(reading),
            Err(e) => FetchState::Failed(e),
        };
        true
    }

    /// Tear the display down. No further fetch can begin and no completion
    /// can write.
    pub fn close(&mut self) {
        self.closed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(raw: u128) -> PriceReading {
        PriceReading::from_raw(Symbol::Eth, raw).unwrap()
    }

    #[test]
    fn test_begin_moves_to_loading() {
        let mut display = PriceDisplayState::new(Symbol::Eth);
        let gen = display.begin().unwrap();
        assert_eq!(gen, 1);
        assert!(display.state().is_loading());
    }

    #[test]
    fn test_apply_success_and_failure() {
        let mut display = PriceDisplayState::new(Symbol::Eth);
        let gen = display.begin().unwrap();
        assert!(display.apply(gen, Ok(reading(100))));
        assert_eq!(display.state().reading().unwrap().raw, 100);

        let gen = display.begin().unwrap();
        assert!(display.state().is_loading());
        assert!(display.apply(gen, Err(FetchError::EmptyResult)));
        assert_eq!(display.state().error(), Some(&FetchError::EmptyResult));
    }

    #[test]
    fn test_latest_issued_fetch_wins_when_stale_arrives_last() {
        // First fetch issued, then a second; the second completes first and
        // the first's late completion must not overwrite it.
        let mut display = PriceDisplayState::new(Symbol::Eth);
        let first = display.begin().unwrap();
        let second = display.begin().unwrap();

        assert!(display.apply(second, Ok(reading(222))));
        assert!(!display.apply(first, Ok(reading(111))));
        assert_eq!(display.state().reading().unwrap().raw, 222);
    }

    #[test]
    fn test_latest_issued_fetch_wins_in_arrival_order_too() {
        // Same outcome when completions arrive in issue order: the first is
        // already superseded by the time it lands.
        let mut display = PriceDisplayState::new(Symbol::Eth);
        let first = display.begin().unwrap();
        let second = display.begin().unwrap();

        assert!(!display.apply(first, Ok(reading(111))));
        assert!(display.state().is_loading());
        assert!(display.apply(second, Ok(reading(222))));
        assert_eq!(display.state().reading().unwrap().raw, 222);
    }

    #[test]
    fn test_superseding_failure_does_not_resurrect() {
        let mut display = PriceDisplayState::new(Symbol::Eth);
        let first = display.begin().unwrap();
        let second = display.begin().unwrap();
        assert!(display.apply(second, Err(FetchError::EmptyResult)));
        assert!(!display.apply(first, Ok(reading(111))));
        assert_eq!(display.state().error(), Some(&FetchError::EmptyResult));
    }

    #[test]
    fn test_closed_display_rejects_begin_and_apply() {
        let mut display = PriceDisplayState::new(Symbol::Eth);
        let gen = display.begin().unwrap();
        display.close();

        assert!(display.begin().is_none());
        // In-flight completion after teardown is a guarded no-op.
        assert!(!display.apply(gen, Ok(reading(100))));
        assert!(display.state().is_loading());
    }
}
