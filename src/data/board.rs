use crate::data::types::Market;

/// Number of markets shown in the trending view.
pub const TRENDING_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    All,
    Trending,
}

/// Markets whose question or description contains `query`, case-insensitively.
pub fn filter_markets<'a>(markets: &'a [Market], query: &str) -> Vec<&'a Market> {
    markets.iter().filter(|m| m.matches(query)).collect()
}

/// Apply the view to an already filtered, volume-ordered list.
pub fn displayed<'a>(filtered: Vec<&'a Market>, view: View) -> Vec<&'a Market> {
    match view {
        View::All => filtered,
        View::Trending => filtered.into_iter().take(TRENDING_LIMIT).collect(),
    }
}

/// Fetched markets plus the current search and view selection.
#[derive(Debug, Default)]
pub struct MarketBoard {
    markets: Vec<Market>,
    view: View,
    search: String,
}

impl MarketBoard {
    pub fn new(markets: Vec<Market>) -> Self {
        Self {
            markets,
            ..Default::default()
        }
    }

    pub fn set_view(&mut self, view: View) {
        self.view = view;
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn find(&self, id: &str) -> Option<&Market> {
        self.markets.iter().find(|m| m.id == id)
    }

    pub fn visible(&self) -> Vec<&Market> {
        displayed(filter_markets(&self.markets, &self.search), self.view)
    }

    pub fn len(&self) -> usize {
        self.visible().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::types::sample_market;

    fn board_of(n: usize) -> MarketBoard {
        let markets = (0..n)
            .map(|i| {
                let question = if i % 2 == 0 { "Will BTC moon?" } else { "Will ETH moon?" };
                sample_market(&format!("m{}", i), question, (n - i) as f64, 1.0)
            })
            .collect();
        MarketBoard::new(markets)
    }

    #[test]
    fn test_all_view_shows_everything() {
        let board = board_of(14);
        assert_eq!(board.view(), View::All);
        assert_eq!(board.len(), 14);
    }

    #[test]
    fn test_trending_takes_first_ten_in_order() {
        let mut board = board_of(14);
        board.set_view(View::Trending);

        let visible = board.visible();
        assert_eq!(visible.len(), TRENDING_LIMIT);
        assert_eq!(visible[0].id, "m0");
        assert_eq!(visible[9].id, "m9");
    }

    #[test]
    fn test_search_applies_before_trending_cut() {
        let mut board = board_of(30);
        board.set_search("eth");
        assert_eq!(board.len(), 15);

        board.set_view(View::Trending);
        let visible = board.visible();
        assert_eq!(visible.len(), 10);
        assert!(visible.iter().all(|m| m.question.contains("ETH")));
        assert_eq!(visible[0].id, "m1");
    }

    #[test]
    fn test_no_match_is_empty() {
        let mut board = board_of(3);
        board.set_search("doge");
        assert!(board.is_empty());
        assert!(board.find("m2").is_some());
        assert!(board.find("missing").is_none());
    }
}
