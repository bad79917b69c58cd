use ::pinyin::ToPinyin;
use tracing::trace;

use super::segment::SyllableSegmenter;
use super::Transcriber;

/// Mandarin transcriber backed by the `pinyin` crate's character table.
///
/// Each character takes its most common reading on its own, so polyphones
/// are not resolved from context: 重庆 reads `zhong qing`, not `chong qing`.
/// Toneless output spells ü as `v` (绿 → `lv`) to match romanized input.
#[derive(Debug, Clone, Copy, Default)]
pub struct PinyinTranscriber;

impl PinyinTranscriber {
    pub fn new() -> Self {
        Self
    }
}

impl Transcriber for PinyinTranscriber {
    fn transcribe(&self, text: &str, ignore_tones: bool) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }
        if is_romanized(text) {
            return SyllableSegmenter::global().segment(text);
        }

        let mut tokens = Vec::new();
        let mut run = String::new();
        for ch in text.chars() {
            if ch.is_whitespace() {
                flush(&mut run, &mut tokens);
                continue;
            }
            match ch.to_pinyin() {
                Some(p) => {
                    flush(&mut run, &mut tokens);
                    let syllable = if ignore_tones {
                        p.plain().replace('ü', "v")
                    } else {
                        p.with_tone().to_string()
                    };
                    tokens.push(syllable);
                }
                None => run.push(ch),
            }
        }
        flush(&mut run, &mut tokens);

        trace!(text, ?tokens, "transcribed");
        tokens
    }
}

fn is_romanized(text: &str) -> bool {
    text.bytes().all(|b| b.is_ascii_lowercase())
}

fn flush(run: &mut String, tokens: &mut Vec<String>) {
    if !run.is_empty() {
        tokens.push(std::mem::take(run));
    }
}
