//! Page jump box.

/// Text field for jumping straight to a page.
///
/// The field mirrors `page_index + 1`. External page changes always win:
/// [`sync`](Self::sync) overwrites whatever the user typed as soon as the
/// authoritative index moves. [`commit`](Self::commit) runs on blur or
/// confirm and either yields a clamped page index or reverts the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageNavigator {
    input: String,
    synced_index: usize,
}

impl Default for PageNavigator {
    fn default() -> Self {
        Self::new(0)
    }
}

impl PageNavigator {
    pub fn new(page_index: usize) -> Self {
        Self {
            input: display(page_index),
            synced_index: page_index,
        }
    }

    /// Current field text.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Replace the field text (an edit, not a commit).
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Append a typed character. Only digits are accepted.
    pub fn push_char(&mut self, c: char) -> bool {
        if c.is_ascii_digit() {
            self.input.push(c);
            true
        } else {
            false
        }
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    /// Follow the authoritative page index.
    ///
    /// Returns `true` when the index moved and the text was overwritten.
    pub fn sync(&mut self, page_index: usize) -> bool {
        if page_index == self.synced_index {
            return false;
        }
        self.synced_index = page_index;
        self.input = display(page_index);
        true
    }

    /// Apply the typed page.
    ///
    /// Returns the new zero-based page index, or `None` when the text is not
    /// a positive number, in which case the text is reset to the current
    /// page. A `page_count` of zero is treated as a single page.
    pub fn commit(&mut self, page_index: usize, page_count: usize) -> Option<usize> {
        match parse_page(&self.input) {
            Some(page) => {
                let clamped = clamp_page(page, page_count);
                self.input = clamped.to_string();
                self.synced_index = clamped - 1;
                Some(clamped - 1)
            }
            None => {
                self.input = display(page_index);
                self.synced_index = page_index;
                None
            }
        }
    }
}

fn display(page_index: usize) -> String {
    (page_index + 1).to_string()
}

/// Parse a page number, rejecting anything that is not a number above zero.
pub fn parse_page(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|page| !page.is_nan() && *page > 0.0)
}

/// Round to the nearest page and clamp into `[1, page_count]`.
pub fn clamp_page(page: f64, page_count: usize) -> usize {
    let last = page_count.max(1);
    let rounded = page.round();
    if rounded >= last as f64 {
        last
    } else if rounded < 1.0 {
        1
    } else {
        rounded as usize
    }
}
