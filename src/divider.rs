use crate::{EditEvent, FormatModel};

/// Inserts or removes the divider at `position` after a single edit.
///
/// Only a buffer that ends exactly at `position` is touched. A forward edit that
/// reached the boundary gets the divider appended; any other edit landing there was a
/// deletion back over the divider, so the digit before it goes too.
pub fn apply_divider(buffer: &str, position: usize, divider: char, edit_start: usize, removed: usize) -> String {
    if buffer.len() != position {
        return buffer.to_owned();
    }

    let mut working = buffer.to_owned();
    if removed <= position && edit_start < position {
        working.push(divider);
    } else {
        working.pop();
    }
    working
}

/// Runs [`apply_divider`] for every divider offset of `model`, in ascending order,
/// each pass seeing the result of the previous one.
pub fn apply_dividers(buffer: &str, model: &FormatModel, edit: &EditEvent) -> String {
    let divider = model.divider().as_char();
    model
        .divider_positions()
        .into_iter()
        .fold(buffer.to_owned(), |working, position| {
            apply_divider(&working, position, divider, edit.start, edit.removed)
        })
}
