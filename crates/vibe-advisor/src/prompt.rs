//! Prompt Templates
//!
//! Fixed, ordered template tables per mode plus a uniform index draw.

use rand::Rng;
use rust_decimal::Decimal;

use crate::model::{PositionAnalysis, PositionQuery};

/// Which kind of text we want back
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PromptMode {
    /// Free-form "what should I ape into" suggestion
    Suggestion,
    /// Commentary on a client-described position
    Analysis,
}

/// Default system preamble for the vibe agent
pub const VIBE_PREAMBLE: &str = "You are a hyper-online crypto degen who gives DOGE leverage \
trading vibes on the 1 minute chart. You always answer in one or two punchy sentences, you always \
name a side (long or short) and a leverage written like 25x, and you always remind people it is \
not financial advice, just vibes.";

pub const SUGGESTION_TEMPLATES: &[&str] = &[
    "I'm a junior vibe trader that wants to earn on dogecoin with 50x leverage and 1 min chart. \
     What position should I take rn? Not financial advice, just vibes. In one sentence.",
    "Give me your spiciest DOGE call for the next 5 minutes: long or short, and how much leverage? \
     Just vibes, one sentence.",
    "The doge is barking. Should I long or short DOGE with leverage right now? Answer in one \
     sentence with a leverage like 20x.",
    "Pretend you're a meme coin oracle. What's the DOGE play this minute, long or short, and at \
     what leverage? Keep it to one sentence.",
    "Quick vibe check on DOGE perps: which side and what leverage would a true degen pick right \
     now? One sentence, not financial advice.",
];

pub const ANALYSIS_TEMPLATES: &[&str] = &[
    "I'm in a DOGE {position_type} of size {position_size}. Entry {entry_price}, current price \
     {current_price}, liquidation at {liquidation_price}, PnL {pnl}. I'm {distance}% away from \
     liquidation, which is {risk_level} risk. Should I hold, add, or close? Give me vibes, not \
     financial advice, in two sentences.",
    "Rate my DOGE position: {position_type}, size {position_size}, entered at {entry_price}, now \
     {current_price}, liq {liquidation_price}, PnL {pnl}. Distance to liquidation is {distance}% \
     ({risk_level} risk). What's the move? Two sentences max.",
    "Degen risk review: {risk_level} risk DOGE {position_type}, {distance}% from getting \
     liquidated at {liquidation_price}. Entry {entry_price}, current {current_price}, size \
     {position_size}, PnL {pnl}. Talk me through it in two vibey sentences.",
];

impl PromptMode {
    pub const fn templates(self) -> &'static [&'static str] {
        match self {
            Self::Suggestion => SUGGESTION_TEMPLATES,
            Self::Analysis => ANALYSIS_TEMPLATES,
        }
    }

    /// Pick one template uniformly at random
    pub fn pick<R: Rng + ?Sized>(self, rng: &mut R) -> &'static str {
        let templates = self.templates();
        templates[rng.gen_range(0..templates.len())]
    }
}

/// Render a suggestion prompt, appending the price clause when known
pub fn render_suggestion(template: &str, price: Option<Decimal>) -> String {
    match price {
        Some(price) => format!("{template} DOGE is trading at ${} right now.", price.normalize()),
        None => template.to_string(),
    }
}

/// Render an analysis prompt by filling its named placeholders
pub fn render_analysis(template: &str, query: &PositionQuery, analysis: &PositionAnalysis) -> String {
    let fields = [
        ("{position_size}", query.position_size.normalize().to_string()),
        ("{entry_price}", query.entry_price.normalize().to_string()),
        ("{liquidation_price}", query.liquidation_price.normalize().to_string()),
        ("{current_price}", query.current_price.normalize().to_string()),
        ("{pnl}", query.pnl_size.normalize().to_string()),
        (
            "{distance}",
            analysis.distance_to_liquidation_pct.round_dp(2).normalize().to_string(),
        ),
        ("{position_type}", analysis.position_type.to_string()),
        ("{risk_level}", analysis.risk_level.to_string()),
    ];

    fields
        .iter()
        .fold(template.to_string(), |acc, (placeholder, value)| acc.replace(*placeholder, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PositionType, RiskLevel};
    use rand::{SeedableRng, rngs::StdRng};
    use rust_decimal_macros::dec;
    use std::collections::HashSet;

    #[test]
    fn test_pick_covers_every_template() {
        let mut rng = StdRng::seed_from_u64(7);
        for mode in [PromptMode::Suggestion, PromptMode::Analysis] {
            let seen: HashSet<_> = (0..500).map(|_| mode.pick(&mut rng)).collect();
            assert_eq!(seen.len(), mode.templates().len());
        }
    }

    #[test]
    fn test_suggestion_price_clause() {
        let with_price = render_suggestion("Vibes?", Some(dec!(0.12340000)));
        assert_eq!(with_price, "Vibes? DOGE is trading at $0.1234 right now.");

        let without = render_suggestion("Vibes?", None);
        assert_eq!(without, "Vibes?");
    }

    #[test]
    fn test_analysis_placeholders_all_filled() {
        let query = PositionQuery {
            position_size: dec!(1000),
            entry_price: dec!(0.10),
            liquidation_price: dec!(0.08),
            current_price: dec!(0.095),
            pnl_size: dec!(-5),
        };
        let analysis = PositionAnalysis {
            distance_to_liquidation_pct: dec!(15.789473),
            position_type: PositionType::Long,
            risk_level: RiskLevel::Medium,
        };

        for template in ANALYSIS_TEMPLATES {
            let prompt = render_analysis(template, &query, &analysis);
            assert!(!prompt.contains('{'), "unfilled placeholder in: {prompt}");
            assert!(prompt.contains("15.79"));
            assert!(prompt.contains("MEDIUM"));
            assert!(prompt.contains("0.095"));
        }
    }
}
