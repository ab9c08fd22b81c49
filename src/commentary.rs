//! Post-round announcer commentary
//!
//! The text generator is an external collaborator. The round is already over
//! when it is asked, and a failing or missing generator must never block the
//! game over screen: every path ends in a displayable string.

use futures::future::{BoxFuture, FutureExt};

use crate::standings::PlayerStats;

/// Shown when the generator fails
pub const FALLBACK_ERROR: &str = "CONNECTION LOST... BUT THE VOID REMAINS.";
/// Shown when the generator answers with nothing
pub const FALLBACK_EMPTY: &str = "GAME OVER! INSERT COIN.";

/// Why a commentary request failed
#[derive(Debug, thiserror::Error)]
pub enum CommentaryError {
    #[error("commentary service unavailable: {0}")]
    Unavailable(String),
    #[error("commentary request failed: {0}")]
    Request(String),
}

/// Something that turns a finished match into a line of text
pub trait CommentaryProvider: Send + Sync {
    fn commentary(&self, stats: PlayerStats, won: bool) -> BoxFuture<'_, Result<String, CommentaryError>>;
}

/// Local canned quotes, keyed by rank and result
#[derive(Debug, Clone, Copy, Default)]
pub struct CannedCommentary;

impl CannedCommentary {
    pub fn quote(stats: &PlayerStats, won: bool) -> &'static str {
        match (won, stats.rank) {
            (true, _) => "FLAWLESS VICTORY! THE WHOLE MAP FITS IN YOUR POCKET!",
            (false, 1) => "TOP OF THE FOOD CHAIN... BUT NOT QUITE A WIN!",
            (false, 2..=3) => "SO CLOSE! ONE MORE BITE AND THE CROWN WAS YOURS!",
            (false, crate::consts::DEAD_PLAYER_RANK) => "SWALLOWED WHOLE! INSERT COIN FOR REVENGE!",
            _ => "THE VOID IS STILL HUNGRY. FEED IT BETTER NEXT TIME!",
        }
    }
}

impl CommentaryProvider for CannedCommentary {
    fn commentary(&self, stats: PlayerStats, won: bool) -> BoxFuture<'_, Result<String, CommentaryError>> {
        futures::future::ready(Ok(Self::quote(&stats, won).to_string())).boxed()
    }
}

/// Prompt for a remote text generator playing a 90s arcade announcer
pub fn announcer_prompt(stats: &PlayerStats, won: bool) -> String {
    format!(
        "You are a high-energy, retro 90s arcade announcer.\n\
         The player just finished a round of \"PixelVoid.io\".\n\
         \n\
         Stats:\n\
         - Rank: {}\n\
         - Score: {}\n\
         - Objects Consumed: {}\n\
         - Result: {}\n\
         \n\
         Give a SHORT, punchy, 1-2 sentence comment on their performance.\n\
         If they won, hype them up. If they lost, roast them gently but encourage a replay.\n\
         Use arcade slang.",
        stats.rank,
        stats.score,
        stats.objects_consumed(),
        if won { "VICTORY" } else { "DEFEAT" }
    )
}

/// Ask `provider` for commentary, never failing.
///
/// Without a provider the canned local quote is used. Errors and empty answers
/// are replaced with fixed strings.
pub async fn commentary_or_fallback(
    provider: Option<&dyn CommentaryProvider>,
    stats: PlayerStats,
    won: bool,
) -> String {
    let Some(provider) = provider else {
        return CannedCommentary::quote(&stats, won).to_string();
    };
    match provider.commentary(stats, won).await {
        Ok(text) if text.trim().is_empty() => FALLBACK_EMPTY.to_string(),
        Ok(text) => text,
        Err(err) => {
            log::warn!("Commentary unavailable, using fallback: {err}");
            FALLBACK_ERROR.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    struct Failing;

    impl CommentaryProvider for Failing {
        fn commentary(&self, _stats: PlayerStats, _won: bool) -> BoxFuture<'_, Result<String, CommentaryError>> {
            async { Err::<String, _>(CommentaryError::Unavailable("offline".into())) }.boxed()
        }
    }

    struct Silent;

    impl CommentaryProvider for Silent {
        fn commentary(&self, _stats: PlayerStats, _won: bool) -> BoxFuture<'_, Result<String, CommentaryError>> {
            async { Ok::<_, CommentaryError>("   ".to_string()) }.boxed()
        }
    }

    fn stats(rank: u32) -> PlayerStats {
        PlayerStats {
            score: 420,
            kills: 1,
            max_size: 420,
            rank,
        }
    }

    #[test]
    fn test_no_provider_is_deterministic() {
        let a = block_on(commentary_or_fallback(None, stats(1), true));
        let b = block_on(commentary_or_fallback(None, stats(1), true));
        assert_eq!(a, b);
        assert_eq!(a, CannedCommentary::quote(&stats(1), true));
    }

    #[test]
    fn test_quotes_vary_by_rank() {
        let win = CannedCommentary::quote(&stats(1), true);
        let close = CannedCommentary::quote(&stats(2), false);
        let dead = CannedCommentary::quote(&stats(crate::consts::DEAD_PLAYER_RANK), false);
        assert_ne!(win, close);
        assert_ne!(close, dead);
    }

    #[test]
    fn test_failure_falls_back() {
        let text = block_on(commentary_or_fallback(Some(&Failing), stats(4), false));
        assert_eq!(text, FALLBACK_ERROR);
    }

    #[test]
    fn test_empty_reply_falls_back() {
        let text = block_on(commentary_or_fallback(Some(&Silent), stats(4), false));
        assert_eq!(text, FALLBACK_EMPTY);
    }

    #[test]
    fn test_canned_provider() {
        let text = block_on(commentary_or_fallback(Some(&CannedCommentary), stats(3), false));
        assert_eq!(text, CannedCommentary::quote(&stats(3), false));
    }

    #[test]
    fn test_prompt_contents() {
        let prompt = announcer_prompt(&stats(2), false);
        assert!(prompt.contains("Rank: 2"));
        assert!(prompt.contains("Objects Consumed: 42"));
        assert!(prompt.contains("DEFEAT"));
    }
}
