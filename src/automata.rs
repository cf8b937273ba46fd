// automata.rs - Engine backend over regex-automata's meta regex.
//
// The meta engine searches UTF-8 bytes, so a matcher keeps a UTF-8 shadow
// of the bound text plus a per-character map between native units and
// shadow bytes. The shadow is filled by pulling the text chunk-by-chunk
// through the adapter at bind time; every span the engine reports is
// translated back to native units before it leaves this module.

use std::ops::Range;
use std::sync::Arc;

use regex_automata::meta;
use regex_automata::util::captures::Captures;
use regex_automata::{Anchored, Input, PatternID};
use regex_syntax::ParserBuilder;
use smallvec::SmallVec;

use crate::chunk::TextSource;
use crate::engine::{CompiledPattern, Engine, EngineStatus, Matcher};
use crate::error::RegexError;
use crate::options::PatternOptions;

/// The default engine, backed by regex-automata.
pub struct AutomataEngine;

/// Shared engine instance; `PatternBuilder` points here unless told
/// otherwise.
pub static AUTOMATA: AutomataEngine = AutomataEngine;

impl Engine for AutomataEngine {
    fn compile(
        &self,
        pattern: &str,
        options: PatternOptions,
    ) -> Result<Arc<dyn CompiledPattern>, RegexError> {
        let literal = options.contains(PatternOptions::IGNORE_METACHARACTERS);
        let source = if literal {
            regex_syntax::escape(pattern)
        } else {
            pattern.to_string()
        };
        let mut parser = ParserBuilder::new();
        parser
            .unicode(true)
            .utf8(true)
            .case_insensitive(options.contains(PatternOptions::CASE_INSENSITIVE));
        if !literal {
            parser
                .multi_line(options.contains(PatternOptions::ANCHORS_MATCH_LINES))
                .dot_matches_new_line(options.contains(PatternOptions::DOT_MATCHES_LINE_SEPARATORS))
                .ignore_whitespace(options.contains(PatternOptions::ALLOW_COMMENTS_AND_WHITESPACE));
        }
        let hir = parser
            .build()
            .parse(&source)
            .map_err(|err| syntax_error(pattern, err))?;
        let regex = meta::Regex::builder()
            .build_from_hir(&hir)
            .map_err(|err| RegexError::Compile {
                pattern: pattern.to_string(),
                message: err.to_string(),
                offset: None,
            })?;
        Ok(Arc::new(AutomataProgram { regex }))
    }
}

fn syntax_error(pattern: &str, err: regex_syntax::Error) -> RegexError {
    let offset = match &err {
        regex_syntax::Error::Parse(e) => Some(e.span().start.offset),
        regex_syntax::Error::Translate(e) => Some(e.span().start.offset),
        _ => None,
    };
    RegexError::Compile {
        pattern: pattern.to_string(),
        message: err.to_string(),
        offset,
    }
}

/// Immutable compiled state; matchers share it through a cheap handle
/// clone, never by re-parsing the source.
#[derive(Debug)]
struct AutomataProgram {
    regex: meta::Regex,
}

impl CompiledPattern for AutomataProgram {
    fn spawn_matcher(&self) -> Result<Box<dyn Matcher>, RegexError> {
        let caps = self.regex.create_captures();
        Ok(Box::new(AutomataMatcher {
            regex: self.regex.clone(),
            caps,
            haystack: String::new(),
            map: IndexMap::default(),
            native_len: 0,
            region: 0..0,
            transparent: false,
            anchoring: true,
            last_end: None,
            last_was_empty: false,
            groups: None,
        }))
    }

    fn group_count(&self) -> usize {
        self.regex
            .group_info()
            .group_len(PatternID::ZERO)
            .saturating_sub(1)
    }

    fn group_index(&self, name: &str) -> Option<usize> {
        self.regex.group_info().to_index(PatternID::ZERO, name)
    }
}

/// One entry per decoded character; a trailing sentinel closes the map.
struct MapEntry {
    unit: usize,
    byte: usize,
}

#[derive(Default)]
struct IndexMap {
    entries: Vec<MapEntry>,
}

impl IndexMap {
    fn clear(&mut self) {
        self.entries.clear();
    }

    fn push(&mut self, unit: usize, byte: usize) {
        self.entries.push(MapEntry { unit, byte });
    }

    fn unit_to_byte(&self, unit: usize) -> usize {
        let i = self.entries.partition_point(|e| e.unit <= unit);
        if i == 0 {
            0
        } else {
            self.entries[i - 1].byte
        }
    }

    fn byte_to_unit(&self, byte: usize) -> usize {
        let i = self.entries.partition_point(|e| e.byte <= byte);
        if i == 0 {
            0
        } else {
            self.entries[i - 1].unit
        }
    }
}

struct AutomataMatcher {
    regex: meta::Regex,
    caps: Captures,
    haystack: String,
    map: IndexMap,
    native_len: usize,
    region: Range<usize>,
    transparent: bool,
    anchoring: bool,
    last_end: Option<usize>,
    last_was_empty: bool,
    groups: Option<SmallVec<[Option<Range<usize>>; 8]>>,
}

impl AutomataMatcher {
    fn push_char(&mut self, c: char, unit_start: usize) {
        self.map.push(unit_start, self.haystack.len());
        self.haystack.push(c);
    }

    // Incremental UTF-16 decode; unpaired surrogates become U+FFFD so the
    // shadow stays valid UTF-8.
    fn push_unit(&mut self, unit: u16, at: usize, pending: &mut Option<(u16, usize)>) {
        if let Some((high, high_at)) = pending.take() {
            if (0xdc00..=0xdfff).contains(&unit) {
                let scalar = 0x10000 + (((high as u32 - 0xd800) << 10) | (unit as u32 - 0xdc00));
                let c = char::from_u32(scalar).unwrap_or(char::REPLACEMENT_CHARACTER);
                self.push_char(c, high_at);
                return;
            }
            self.push_char(char::REPLACEMENT_CHARACTER, high_at);
        }
        if (0xd800..=0xdbff).contains(&unit) {
            *pending = Some((unit, at));
        } else if (0xdc00..=0xdfff).contains(&unit) {
            self.push_char(char::REPLACEMENT_CHARACTER, at);
        } else {
            let c = char::from_u32(unit as u32).unwrap_or(char::REPLACEMENT_CHARACTER);
            self.push_char(c, at);
        }
    }

    // Native position one whole character past `native`; past-the-end when
    // no character remains.
    fn advance_one_char(&self, native: usize) -> usize {
        let byte = self.map.unit_to_byte(native);
        match self.haystack[byte..].chars().next() {
            Some(c) => self.map.byte_to_unit(byte + c.len_utf8()),
            None => self.native_len + 1,
        }
    }

    fn search_at(&mut self, start: usize, anchored: Anchored) -> Result<bool, EngineStatus> {
        let region_start = self.map.unit_to_byte(self.region.start);
        let region_end = self.map.unit_to_byte(self.region.end);
        let search = self.map.unit_to_byte(start).max(region_start);
        if search > region_end {
            self.groups = None;
            return Ok(false);
        }
        // Opaque anchoring bounds slice the haystack so ^/$ see the region
        // as the whole text; transparent non-anchoring bounds search a span
        // of the full haystack so surrounding context stays visible.
        let sliced = self.anchoring && !self.transparent;
        let (input, base) = if sliced {
            let slice = &self.haystack[region_start..region_end];
            let input = Input::new(slice)
                .range(search - region_start..slice.len())
                .anchored(anchored);
            (input, region_start)
        } else {
            let input = Input::new(self.haystack.as_str())
                .range(search..region_end)
                .anchored(anchored);
            (input, 0)
        };
        self.regex.search_captures(&input, &mut self.caps);
        if !self.caps.is_match() {
            self.groups = None;
            return Ok(false);
        }
        let group_len = self.regex.group_info().group_len(PatternID::ZERO);
        let mut spans: SmallVec<[Option<Range<usize>>; 8]> = SmallVec::with_capacity(group_len);
        for index in 0..group_len {
            let span = self.caps.get_group(index).map(|s| {
                self.map.byte_to_unit(s.start + base)..self.map.byte_to_unit(s.end + base)
            });
            spans.push(span);
        }
        let whole = match spans.first().cloned().flatten() {
            Some(whole) => whole,
            None => return Err(EngineStatus::Internal("match reported without group 0")),
        };
        self.last_was_empty = whole.start == whole.end;
        self.last_end = Some(whole.end);
        self.groups = Some(spans);
        Ok(true)
    }
}

impl Matcher for AutomataMatcher {
    fn bind(
        &mut self,
        text: &mut dyn TextSource,
        region: Option<Range<usize>>,
    ) -> Result<(), EngineStatus> {
        let length = text.native_length();
        let region = region.unwrap_or(0..length);
        if region.start > region.end || region.end > length {
            return Err(EngineStatus::BadRegion {
                start: region.start,
                end: region.end,
                length,
            });
        }
        self.haystack.clear();
        self.map.clear();
        let mut pending: Option<(u16, usize)> = None;
        let mut pos = 0;
        while pos < length {
            if !text.access(pos, true) {
                return Err(EngineStatus::Internal("text access failed while binding"));
            }
            let covered = text.window_range();
            let offset = text.chunk_offset();
            let window = text.window();
            if offset >= window.len() {
                return Err(EngineStatus::Internal("empty chunk while binding"));
            }
            for (i, &unit) in window[offset..].iter().enumerate() {
                self.push_unit(unit, covered.start + offset + i, &mut pending);
            }
            pos = covered.end;
        }
        if let Some((_, at)) = pending.take() {
            self.push_char(char::REPLACEMENT_CHARACTER, at);
        }
        self.map.push(length, self.haystack.len());
        self.native_len = length;
        self.region = region;
        self.last_end = None;
        self.last_was_empty = false;
        self.groups = None;
        Ok(())
    }

    fn set_bounds(&mut self, transparent: bool, anchoring: bool) -> Result<(), EngineStatus> {
        if transparent == anchoring {
            return Err(EngineStatus::UnsupportedBounds);
        }
        self.transparent = transparent;
        self.anchoring = anchoring;
        Ok(())
    }

    fn find_next(&mut self) -> Result<bool, EngineStatus> {
        let mut start = self.last_end.unwrap_or(self.region.start);
        if self.last_was_empty {
            start = self.advance_one_char(start);
        }
        if start > self.region.end {
            self.groups = None;
            return Ok(false);
        }
        self.search_at(start, Anchored::No)
    }

    fn looking_at(&mut self, at: Option<usize>) -> Result<bool, EngineStatus> {
        let anchor = at.unwrap_or(self.region.start);
        if anchor < self.region.start || anchor > self.region.end {
            return Err(EngineStatus::IndexOutOfBounds {
                index: anchor,
                length: self.native_len,
            });
        }
        self.search_at(anchor, Anchored::Yes)
    }

    fn group_count(&self) -> usize {
        self.regex
            .group_info()
            .group_len(PatternID::ZERO)
            .saturating_sub(1)
    }

    fn group_span(&self, group: usize) -> Result<Option<Range<usize>>, EngineStatus> {
        let groups = match &self.groups {
            Some(groups) => groups,
            None => return Err(EngineStatus::InvalidState),
        };
        match groups.get(group) {
            Some(span) => Ok(span.clone()),
            None => Err(EngineStatus::IndexOutOfBounds {
                index: group,
                length: groups.len(),
            }),
        }
    }

    fn reset(&mut self) {
        self.haystack.clear();
        self.map.clear();
        self.native_len = 0;
        self.region = 0..0;
        self.transparent = false;
        self.anchoring = true;
        self.last_end = None;
        self.last_was_empty = false;
        self.groups = None;
    }
}
