//! The edit reaction loop.
//!
//! [`DateEditController`] turns one text edit into one [`Reaction`]. It can run in
//! two ways:
//!
//! - **Host-driven**: the host owns the text widget and forwards every change through
//!   [`DateEditController::on_text_changed`]. The corrected text the host writes back
//!   fires another change; the controller recognises that echo and answers
//!   [`Reaction::Echo`].
//! - **Owned buffer**: [`DateEditController::edit`] splices the controller's own
//!   buffer and reacts in the same call, so no echo exists.
//!
//! Every method takes `&mut self`, so edits are processed strictly one at a time.

use log::{debug, trace};

use crate::{
    CalendarDate, ConfigError, Configuration, FieldError, FieldValidator, FormatModel, Validation, apply_dividers,
    parse_masked,
};

/// A single buffer mutation, as reported by a text-change callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EditEvent {
    /// Offset where the change starts
    pub start:    usize,
    /// Characters removed at `start`
    pub removed:  usize,
    /// Characters inserted at `start`
    pub inserted: usize,
}

impl EditEvent {
    pub const fn new(start: usize, removed: usize, inserted: usize) -> Self {
        Self {
            start,
            removed,
            inserted,
        }
    }

    pub const fn insert(start: usize, count: usize) -> Self {
        Self::new(start, 0, count)
    }

    pub const fn delete(start: usize, count: usize) -> Self {
        Self::new(start, count, 0)
    }

    /// Whether the edit made the buffer longer.
    pub const fn grows(&self) -> bool {
        self.removed < self.inserted
    }
}

/// Whether the next change notification is the host echoing our own write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Idle,
    AwaitingEcho,
}

/// The template with the already typed prefix emphasized.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HelperText {
    pub template:    String,
    /// Length of the emphasized prefix
    pub highlighted: usize,
    /// ARGB color of the emphasized prefix
    pub color:       u32,
}

impl HelperText {
    pub fn highlighted_part(&self) -> &str {
        self.template.get(..self.highlighted).unwrap_or(&self.template)
    }

    pub fn rest(&self) -> &str {
        self.template.get(self.highlighted..).unwrap_or_default()
    }
}

/// What the host should do with the helper text line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum HelperTextUpdate {
    #[default]
    Unchanged,
    Clear,
    Show(HelperText),
}

/// Result of one edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reaction {
    /// The change was the echo of the controller's previous write.
    Echo,
    /// The user typed over a rejected value, which is restored verbatim.
    SnapBack { text: String, cursor: usize },
    /// The edit broke the digit/divider layout and was undone.
    Rejected { text: String, cursor: usize },
    /// The corrected buffer, with the error to show (`None` clears it).
    Corrected {
        text:        String,
        cursor:      usize,
        error:       Option<FieldError>,
        helper_text: HelperTextUpdate,
    },
}

impl Reaction {
    /// Text the host must display, unless this was an echo.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Echo => None,
            Self::SnapBack { text, .. } | Self::Rejected { text, .. } | Self::Corrected { text, .. } => Some(text),
        }
    }

    pub const fn error(&self) -> Option<&FieldError> {
        match self {
            Self::Corrected { error, .. } => error.as_ref(),
            Self::Echo | Self::SnapBack { .. } | Self::Rejected { .. } => None,
        }
    }

    /// Pushes this reaction to a view.
    pub fn apply_to(&self, view: &mut impl FieldView) {
        match self {
            Self::Echo => {},
            Self::SnapBack { text, cursor } | Self::Rejected { text, cursor } => {
                view.set_text(text);
                view.set_cursor(*cursor);
            },
            Self::Corrected {
                text,
                cursor,
                error,
                helper_text,
            } => {
                view.set_text(text);
                view.set_cursor(*cursor);
                match error {
                    Some(error) => view.set_error(error),
                    None => view.clear_error(),
                }
                match helper_text {
                    HelperTextUpdate::Unchanged => {},
                    HelperTextUpdate::Clear => view.set_helper_text(None),
                    HelperTextUpdate::Show(helper) => view.set_helper_text(Some(helper)),
                }
            },
        }
    }
}

/// The text widget and its error/helper lines, as seen by the controller.
pub trait FieldView {
    fn set_text(&mut self, text: &str);

    fn set_cursor(&mut self, offset: usize);

    fn set_error(&mut self, error: &FieldError);

    fn clear_error(&mut self);

    /// Hosts without a helper line can ignore this.
    fn set_helper_text(&mut self, _helper: Option<&HelperText>) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateEditController {
    config:        Configuration,
    validator:     FieldValidator,
    text:          String,
    phase:         Phase,
    /// Buffer written together with the last error; lives for exactly one edit.
    pending_error: Option<String>,
}

impl DateEditController {
    pub fn new(config: Configuration) -> Self {
        debug!("date field ready with template {}", config.hint());
        Self {
            config,
            validator: FieldValidator::new(config),
            text: String::new(),
            phase: Phase::Idle,
            pending_error: None,
        }
    }

    pub const fn config(&self) -> &Configuration {
        &self.config
    }

    /// The buffer as last written.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn phase(&self) -> Phase {
        self.phase
    }

    pub fn pending_error(&self) -> Option<&str> {
        self.pending_error.as_deref()
    }

    /// Input hint for the host, e.g. `dd/MM/yyyy`.
    pub fn hint(&self) -> String {
        self.config.hint()
    }

    pub fn is_complete(&self) -> bool {
        self.text.len() == self.model().rendered_len()
    }

    /// The typed date, once the buffer is complete and names a real day.
    pub fn value(&self) -> Option<CalendarDate> {
        if !self.is_complete() {
            return None;
        }
        parse_masked(&self.text, &self.model()).ok()
    }

    /// Empties the buffer and forgets any pending error.
    pub fn clear(&mut self) {
        self.text.clear();
        self.pending_error = None;
        self.phase = Phase::Idle;
    }

    /// Swaps in a new configuration as a whole and starts from an empty buffer.
    pub fn reconfigure(&mut self, config: Configuration) {
        debug!("reconfigured date field to template {}", config.hint());
        self.config = config;
        self.validator = FieldValidator::new(config);
        self.clear();
    }

    /// Replaces both bounds, keeping the buffer.
    ///
    /// # Errors
    /// Returns `ConfigError::Bounds` if both dates are set and min >= max; the previous
    /// configuration stays in force.
    pub fn set_bounds(&mut self, min: Option<CalendarDate>, max: Option<CalendarDate>) -> Result<(), ConfigError> {
        let config = self.config.with_bounds(min, max)?;
        self.config = config;
        self.validator = FieldValidator::new(config);
        Ok(())
    }

    /// Reacts to a change the host already applied to its widget.
    ///
    /// `text` is the widget content after the change. Unless the answer is
    /// [`Reaction::Echo`], the host must write the returned text back and move the
    /// cursor; that write is expected to come back here as the echo.
    pub fn on_text_changed(&mut self, text: &str, edit: EditEvent) -> Reaction {
        if self.phase == Phase::AwaitingEcho {
            self.phase = Phase::Idle;
            if text == self.text {
                trace!("echo of {text:?} ignored");
                return Reaction::Echo;
            }
            // the host skipped notifying our write, so this is a user edit
            trace!("no echo for {:?}, got {text:?}", self.text);
        }

        let reaction = self.react(text, edit);
        self.phase = Phase::AwaitingEcho;
        reaction
    }

    /// Replaces `removed` characters at `start` of the owned buffer with `insert`.
    pub fn edit(&mut self, start: usize, removed: usize, insert: &str) -> Reaction {
        let mut text = self.text.clone();
        let start = start.min(text.len());
        let end = start.saturating_add(removed).min(text.len());
        if !text.is_char_boundary(start) || !text.is_char_boundary(end) {
            return self.rejected();
        }
        text.replace_range(start..end, insert);

        self.phase = Phase::Idle;
        self.react(&text, EditEvent::new(start, end - start, insert.chars().count()))
    }

    /// Types one character at the end of the owned buffer.
    pub fn type_char(&mut self, c: char) -> Reaction {
        let mut buf = [0; 4];
        self.edit(self.text.len(), 0, c.encode_utf8(&mut buf))
    }

    /// Deletes the last character of the owned buffer.
    pub fn backspace(&mut self) -> Reaction {
        let start = self.text.char_indices().next_back().map_or(0, |(i, _)| i);
        self.edit(start, self.text.len() - start, "")
    }

    fn model(&self) -> FormatModel {
        self.config.model()
    }

    fn react(&mut self, text: &str, edit: EditEvent) -> Reaction {
        trace!("edit {edit:?} -> {text:?}");
        let model = self.model();
        let pending = self.pending_error.take();

        let truncated = truncate(text, model.rendered_len());
        let buffer = if is_well_formed(truncated, &model) {
            Some(truncated.to_owned())
        } else if edit.inserted == 0 {
            // a deletion inside the buffer shifts digits onto the divider offsets
            relayout(truncated, &model)
        } else {
            None
        };
        let Some(buffer) = buffer else {
            debug!("rejected malformed buffer {truncated:?}");
            return self.rejected();
        };

        let Validation { value, error } = self.validator.validate(&buffer);

        if let Some(pending) = pending {
            if edit.grows() {
                debug!("typed over rejected value, restoring {pending:?}");
                self.text.clone_from(&pending);
                return Reaction::SnapBack {
                    cursor: pending.len(),
                    text:   pending,
                };
            }
        }

        let text = apply_dividers(&value, &model, &edit);

        // an error on a prefix the edit has already removed is moot
        let error = error.filter(|error| text.starts_with(error.value()));
        if let Some(error) = &error {
            debug!("{error} kept pending on {text:?}");
            self.pending_error = Some(text.clone());
        }

        let helper_text = if error.is_some() {
            HelperTextUpdate::Unchanged
        } else {
            self.helper_text_for(&text)
        };

        self.text.clone_from(&text);
        Reaction::Corrected {
            cursor: text.len(),
            text,
            error,
            helper_text,
        }
    }

    fn rejected(&self) -> Reaction {
        Reaction::Rejected {
            text:   self.text.clone(),
            cursor: self.text.len(),
        }
    }

    fn helper_text_for(&self, text: &str) -> HelperTextUpdate {
        let style = self.config.helper_text();
        if !style.enabled {
            return HelperTextUpdate::Unchanged;
        }
        if text.is_empty() {
            return HelperTextUpdate::Clear;
        }
        HelperTextUpdate::Show(HelperText {
            template:    self.config.hint(),
            highlighted: text.len(),
            color:       style.highlight_color,
        })
    }
}

/// At most `max_chars` characters of `text`.
fn truncate(text: &str, max_chars: usize) -> &str {
    text.char_indices().nth(max_chars).map_or(text, |(i, _)| &text[..i])
}

/// Digits everywhere except the divider offsets, which hold the divider.
fn is_well_formed(text: &str, model: &FormatModel) -> bool {
    let divider = model.divider().as_char();
    let positions = model.divider_positions();
    text.chars().enumerate().all(|(i, c)| {
        if positions.contains(&i) {
            c == divider
        } else {
            c.is_ascii_digit()
        }
    })
}

/// The digits of `text` with dividers put back between the fields, or `None` if
/// `text` holds anything else.
fn relayout(text: &str, model: &FormatModel) -> Option<String> {
    let divider = model.divider().as_char();
    let positions = model.divider_positions();
    let mut out = String::with_capacity(model.rendered_len());
    for c in text.chars().filter(|c| *c != divider) {
        if !c.is_ascii_digit() {
            return None;
        }
        if positions.contains(&out.len()) {
            out.push(divider);
        }
        out.push(c);
    }
    Some(out)
}
