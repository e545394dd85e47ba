pub mod pagespeed;

pub use pagespeed::{
    PagespeedClient, ScoreCache, ScoreFetcher, ScoreKey, ScoreSource, Strategy, PAGESPEED_ENDPOINT,
    PAGESPEED_TIMEOUT,
};
