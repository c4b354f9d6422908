use crate::classifier::StructureClassifier;
use crate::config::RuleSet;
use crate::merger::LineMerger;
use crate::normalizer::TextNormalizer;
use crate::sources::{PageSource, PlainTextSource};
use crate::types::{EngineError, PipelineStages, Record};
use std::path::Path;

// Overall progress budget per stage. Classification is the only stage
// whose cost scales with output size, so it gets the wide band.
const PROGRESS_RULES_COMPILED: u8 = 1;
const PROGRESS_PAGES_EXTRACTED: u8 = 5;
const PROGRESS_NORMALIZED: u8 = 10;
const PROGRESS_MERGED: u8 = 25;
const PROGRESS_CLASSIFY_SPAN: u32 = 70;
const PROGRESS_DONE: u8 = 100;

/// Keeps reported progress monotonically non-decreasing, as the progress
/// boundary promises. Consumers must tolerate skipped values and treat
/// 100 as the sole completion signal.
struct ProgressGuard<'a> {
    last: u8,
    sink: &'a mut dyn FnMut(u8),
}

impl<'a> ProgressGuard<'a> {
    fn new(sink: &'a mut dyn FnMut(u8)) -> Self {
        Self { last: 0, sink }
    }

    fn report(&mut self, percent: u8) {
        if percent > self.last {
            self.last = percent;
        }
        (self.sink)(self.last);
    }
}

/// Orchestrates the recognition pipeline: Normalize → Merge → Classify,
/// in that fixed order.
///
/// Normalization must precede merging (header/footer lines would be
/// misread as continuations or entry starts) and merging must precede
/// classification (classification assumes one structural entry per line).
///
/// The engine holds no state between invocations; invocations are fully
/// independent and may run in separate threads without coordination.
/// There is no cancellation primitive: an invocation runs to completion
/// or returns a terminal error, with no partial record emission.
pub struct StructureEngine {
    source: Box<dyn PageSource>,
}

impl StructureEngine {
    /// Create an engine with an injected page source.
    pub fn new(source: Box<dyn PageSource>) -> Self {
        Self { source }
    }

    /// Convenience constructor reading form-feed-paged plain text.
    pub fn new_plain_text() -> Self {
        Self::new(Box::new(PlainTextSource::new()))
    }

    /// Process a document file: extract pages through the injected source,
    /// then run the pipeline.
    ///
    /// An empty result is a valid outcome ("no structural elements
    /// recognized"), distinct from an error.
    pub fn process_file(
        &self,
        input: &Path,
        rules: &RuleSet,
        progress: &mut dyn FnMut(u8),
    ) -> Result<Vec<Record>, EngineError> {
        let mut guard = ProgressGuard::new(progress);

        // Validate configuration before touching the input.
        rules.compile()?;
        guard.report(PROGRESS_RULES_COMPILED);

        let pages = self.source.extract_pages(input)?;
        guard.report(PROGRESS_PAGES_EXTRACTED);

        Ok(self.run_stages(&pages, rules, &mut guard)?.records)
    }

    /// Run the pipeline over already-extracted page texts.
    pub fn process_pages(
        &self,
        pages: &[String],
        rules: &RuleSet,
        progress: &mut dyn FnMut(u8),
    ) -> Result<Vec<Record>, EngineError> {
        let mut guard = ProgressGuard::new(progress);
        Ok(self.run_stages(pages, rules, &mut guard)?.records)
    }

    /// Run the pipeline and capture every intermediate stage output.
    /// Used for diagnostics and tests at the stage boundaries; also how a
    /// caller surfaces the extracted text to a user.
    pub fn process_pages_capture_stages(
        &self,
        pages: &[String],
        rules: &RuleSet,
        progress: &mut dyn FnMut(u8),
    ) -> Result<PipelineStages, EngineError> {
        let mut guard = ProgressGuard::new(progress);
        self.run_stages(pages, rules, &mut guard)
    }

    fn run_stages(
        &self,
        pages: &[String],
        rules: &RuleSet,
        guard: &mut ProgressGuard<'_>,
    ) -> Result<PipelineStages, EngineError> {
        let compiled = rules.compile()?;
        guard.report(PROGRESS_RULES_COMPILED);

        let raw_text = pages.join("\n");

        let normalized_text = TextNormalizer::normalize(pages, rules);
        guard.report(PROGRESS_NORMALIZED);

        let merged_text = LineMerger::merge(&normalized_text, rules, &compiled);
        guard.report(PROGRESS_MERGED);

        let records = StructureClassifier::classify(&merged_text, rules, &compiled, &mut |p| {
            let overall =
                PROGRESS_MERGED as u32 + (p as u32 * PROGRESS_CLASSIFY_SPAN) / 100;
            guard.report(overall as u8);
        });
        guard.report(PROGRESS_DONE);

        Ok(PipelineStages {
            raw_text,
            normalized_text,
            merged_text,
            records,
        })
    }
}
