//! Entry point tying header extraction and segmenting together.

use crate::config::SplitConfig;
use crate::error::SplitResult;
use crate::header::HeaderExtractor;
use crate::line::{Line, lines_from_str};
use crate::segment::{Segment, Segments, SplitStats};

/// Splits one calendar per call. Holds no state between calls.
#[derive(Debug, Clone, Copy)]
pub struct Splitter {
    config: SplitConfig,
}

impl Splitter {
    pub fn new(config: SplitConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> SplitConfig {
        self.config
    }

    /// Extract the header eagerly and return the lazy segment sequence.
    pub fn split<L>(&self, lines: L) -> SplitResult<Segments<L::IntoIter>>
    where
        L: IntoIterator<Item = SplitResult<Line>>,
    {
        let parts = HeaderExtractor::new(lines).extract()?;
        Ok(Segments::new(parts, self.config))
    }

    /// Run the whole split in memory; fails without returning any segment if
    /// the input is malformed anywhere.
    pub fn plan<L>(&self, lines: L) -> SplitResult<SplitPlan>
    where
        L: IntoIterator<Item = SplitResult<Line>>,
    {
        let mut segments = self.split(lines)?;
        let collected = segments.by_ref().collect::<SplitResult<Vec<_>>>()?;

        Ok(SplitPlan {
            segments: collected,
            stats: segments.stats(),
        })
    }

    pub fn plan_str(&self, input: &str) -> SplitResult<SplitPlan> {
        self.plan(lines_from_str(input))
    }
}

/// Every segment of one input, in order.
#[derive(Debug, Clone)]
pub struct SplitPlan {
    segments: Vec<Segment>,
    stats: SplitStats,
}

impl SplitPlan {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn stats(&self) -> SplitStats {
        self.stats
    }
}
