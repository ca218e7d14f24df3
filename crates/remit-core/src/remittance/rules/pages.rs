//! Page count locator ("Page 1 of 3" and variants).

use regex::Regex;
use tracing::trace;

use super::patterns::{PAGE_COMPACT, PAGE_LABELED, PAGE_OF};
use super::{FieldLocator, LineMatch};

/// Reads the page total from the first line carrying a page marker.
///
/// Patterns are tried per line in order: labeled (`Page 2 of 5`, `Page: 2/5`),
/// bare (`2 of 5`), compact (`2of5`). The first line with any match decides;
/// a zero or unparseable total there yields no value.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageCountLocator;

impl PageCountLocator {
    pub fn new() -> Self {
        Self
    }

    fn patterns() -> [&'static Regex; 3] {
        [&*PAGE_LABELED, &*PAGE_OF, &*PAGE_COMPACT]
    }
}

impl FieldLocator for PageCountLocator {
    type Output = u64;

    fn locate<S: AsRef<str>>(&self, lines: &[S]) -> Option<LineMatch<u64>> {
        for (idx, line) in lines.iter().enumerate() {
            let line = line.as_ref();
            let Some(caps) = Self::patterns().iter().find_map(|re| re.captures(line)) else {
                continue;
            };

            let total = caps[2].parse::<u64>().ok().filter(|n| *n > 0);
            trace!("page marker on line {}: {:?} -> {:?}", idx, &caps[0], total);
            return total.map(|n| LineMatch::new(n, idx));
        }
        None
    }
}
