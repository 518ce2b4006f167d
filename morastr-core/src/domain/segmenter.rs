//! Mora segmentation state machine
//!
//! A single left-to-right pass over the classified code points with one
//! pending mora. Spans go to a [`MoraSink`], so counting and full
//! segmentation share the same transitions.

use crate::domain::classifier::{classify, MoraClass};
use crate::domain::types::{Mora, Segmentation};
use crate::error::{ValidationError, ValidationKind};

/// Strict or lenient handling of ill-formed sequences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SegmentMode {
    /// Reject the first orphan character
    #[default]
    Strict,
    /// Drop orphan characters and continue
    Lenient,
}

/// Segmentation policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SegmentConfig {
    /// Validation mode
    pub mode: SegmentMode,
    /// Whether `Other` characters are tolerated in strict mode
    pub allow_other: bool,
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            mode: SegmentMode::Strict,
            allow_other: true,
        }
    }
}

impl SegmentConfig {
    /// Strict mode tolerating non-Japanese content
    pub fn strict() -> Self {
        Self::default()
    }

    /// Lenient mode
    pub fn lenient() -> Self {
        Self {
            mode: SegmentMode::Lenient,
            allow_other: true,
        }
    }

    /// Strict when `validate` is set, lenient otherwise
    pub fn from_validate(validate: bool) -> Self {
        if validate {
            Self::strict()
        } else {
            Self::lenient()
        }
    }

    /// Set the non-Japanese content policy
    pub fn with_allow_other(mut self, allow_other: bool) -> Self {
        self.allow_other = allow_other;
        self
    }

    /// Whether this configuration rejects ill-formed input
    #[inline]
    pub fn is_strict(&self) -> bool {
        self.mode == SegmentMode::Strict
    }
}

/// Receiver of emitted mora spans
pub(crate) trait MoraSink {
    fn push(&mut self, mora: Mora);
}

impl MoraSink for Vec<Mora> {
    #[inline]
    fn push(&mut self, mora: Mora) {
        Vec::push(self, mora);
    }
}

/// Sink that only counts
#[derive(Debug, Default)]
pub(crate) struct MoraCounter(pub usize);

impl MoraSink for MoraCounter {
    #[inline]
    fn push(&mut self, _mora: Mora) {
        self.0 += 1;
    }
}

#[derive(Debug, Clone, Copy)]
enum State {
    /// No pending mora
    Idle,
    /// A syllable that may still take a small kana or a length mark
    Open(Mora),
    /// A length-mark mora was just emitted
    Prolonged,
}

/// Characters left out of the spans
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct Skipped {
    pub other: usize,
    pub dropped: usize,
}

struct Segmenter<'c, S> {
    config: &'c SegmentConfig,
    sink: S,
    state: State,
    skipped: Skipped,
}

impl<'c, S: MoraSink> Segmenter<'c, S> {
    fn new(config: &'c SegmentConfig, sink: S) -> Self {
        Self {
            config,
            sink,
            state: State::Idle,
            skipped: Skipped::default(),
        }
    }

    #[inline]
    fn flush(&mut self) {
        if let State::Open(pending) = self.state {
            self.sink.push(pending);
        }
        self.state = State::Idle;
    }

    /// Strict mode fails, lenient mode drops the character
    #[inline]
    fn reject(&mut self, unit: &Mora, ch: char, kind: ValidationKind) -> Result<(), ValidationError> {
        if self.config.is_strict() {
            return Err(ValidationError {
                offset: unit.start,
                ch,
                kind,
            });
        }
        self.skipped.dropped += 1;
        Ok(())
    }

    fn step(&mut self, offset: usize, byte: usize, ch: char) -> Result<(), ValidationError> {
        let unit = Mora::unit(offset, byte, ch);
        match classify(ch) {
            MoraClass::FullMora => {
                self.flush();
                self.state = State::Open(unit);
            }
            MoraClass::CombiningSmall => {
                let violation = match &mut self.state {
                    State::Open(pending) if pending.len == 1 => {
                        pending.len = 2;
                        pending.byte_end = unit.byte_end;
                        None
                    }
                    State::Open(_) => Some(ValidationKind::StackedCombining),
                    State::Idle | State::Prolonged => Some(ValidationKind::OrphanCombining),
                };
                if let Some(kind) = violation {
                    self.reject(&unit, ch, kind)?;
                }
            }
            MoraClass::Sokuon | MoraClass::MoraicNasal => {
                self.flush();
                self.sink.push(unit);
            }
            MoraClass::LengthMark => match self.state {
                State::Open(_) | State::Prolonged => {
                    self.flush();
                    self.sink.push(unit);
                    self.state = State::Prolonged;
                }
                State::Idle => self.reject(&unit, ch, ValidationKind::OrphanLengthMark)?,
            },
            MoraClass::Other => {
                self.flush();
                if self.config.is_strict() && !self.config.allow_other {
                    return Err(ValidationError {
                        offset,
                        ch,
                        kind: ValidationKind::DisallowedContent,
                    });
                }
                self.skipped.other += 1;
            }
        }
        Ok(())
    }

    fn finish(mut self) -> (S, Skipped) {
        self.flush();
        (self.sink, self.skipped)
    }
}

/// Run the state machine over `text`, feeding spans into `sink`
pub(crate) fn run<S: MoraSink>(
    text: &str,
    config: &SegmentConfig,
    sink: S,
) -> Result<(S, Skipped), ValidationError> {
    let mut segmenter = Segmenter::new(config, sink);
    for (offset, (byte, ch)) in text.char_indices().enumerate() {
        segmenter.step(offset, byte, ch)?;
    }
    Ok(segmenter.finish())
}

/// Segment normalized text into mora spans
pub fn segment(text: &str, config: &SegmentConfig) -> Result<Segmentation, ValidationError> {
    let (morae, skipped) = run(text, config, Vec::with_capacity(text.len() / 3))?;
    Ok(Segmentation {
        morae,
        other: skipped.other,
        dropped: skipped.dropped,
    })
}

/// Count the morae in normalized text without keeping the spans
pub fn count(text: &str, config: &SegmentConfig) -> Result<usize, ValidationError> {
    let (counter, _) = run(text, config, MoraCounter::default())?;
    Ok(counter.0)
}

/// Keep only the characters that belong to a mora
///
/// Uses lenient segmentation, so the result always passes strict
/// segmentation with the same morae.
pub fn retain_morae(text: &str) -> String {
    let (morae, _) = match run(text, &SegmentConfig::lenient(), Vec::new()) {
        Ok(result) => result,
        Err(_) => return String::new(),
    };
    morae.iter().map(|m| m.as_str(text)).collect()
}
