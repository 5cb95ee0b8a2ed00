//! Form field value objects

/// Type-safe field values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    /// A fixed option list, like an HTML `<select>` with a placeholder
    Choice {
        options: Vec<String>,
        selected: Option<usize>,
    },
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub value: FieldValue,
    pub required: bool,
    pub is_multiline: bool,
    /// Visual invalid-state flag, set by the last validation of this field
    pub invalid: bool,
}

impl FormField {
    /// Create a new text field
    pub fn text(name: &str, label: &str, required: bool, is_multiline: bool) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: FieldValue::Text(String::new()),
            required,
            is_multiline,
            invalid: false,
        }
    }

    /// Create a new choice field with nothing selected
    pub fn choice(name: &str, label: &str, required: bool, options: &[String]) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: FieldValue::Choice {
                options: options.to_vec(),
                selected: None,
            },
            required,
            is_multiline: false,
            invalid: false,
        }
    }

    pub fn is_choice(&self) -> bool {
        matches!(self.value, FieldValue::Choice { .. })
    }

    /// Get the submitted value (the selected option for choice fields)
    pub fn as_text(&self) -> &str {
        match &self.value {
            FieldValue::Text(s) => s,
            FieldValue::Choice { options, selected } => selected
                .and_then(|i| options.get(i))
                .map(String::as_str)
                .unwrap_or(""),
        }
    }

    /// Set the text value. Choice fields select the matching option, if any.
    pub fn set_text(&mut self, value: String) {
        match &mut self.value {
            FieldValue::Text(s) => *s = value,
            FieldValue::Choice { options, selected } => {
                *selected = options.iter().position(|o| *o == value);
            }
        }
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        match &mut self.value {
            FieldValue::Text(s) => {
                if c != '\n' || self.is_multiline {
                    s.push(c);
                }
            }
            FieldValue::Choice { options, selected } => {
                // Jump to the next option starting with the typed letter
                let c = c.to_lowercase().next().unwrap_or(c);
                let start = selected.map(|i| i + 1).unwrap_or(0);
                let found = (0..options.len())
                    .map(|offset| (start + offset) % options.len())
                    .find(|&i| options[i].to_lowercase().starts_with(c));
                if found.is_some() {
                    *selected = found;
                }
            }
        }
    }

    /// Append pasted text; line breaks are flattened on single-line fields
    pub fn push_str(&mut self, text: &str) {
        if let FieldValue::Text(s) = &mut self.value {
            if self.is_multiline {
                s.push_str(text);
            } else {
                s.extend(text.chars().map(|c| if c == '\n' || c == '\r' { ' ' } else { c }));
            }
        }
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        match &mut self.value {
            FieldValue::Text(s) => {
                s.pop();
            }
            FieldValue::Choice { selected, .. } => *selected = None,
        }
    }

    /// Select the next option (wraps around)
    pub fn next_choice(&mut self) {
        if let FieldValue::Choice { options, selected } = &mut self.value {
            if options.is_empty() {
                return;
            }
            *selected = Some(match *selected {
                Some(i) => (i + 1) % options.len(),
                None => 0,
            });
        }
    }

    /// Select the previous option (wraps around)
    pub fn prev_choice(&mut self) {
        if let FieldValue::Choice { options, selected } = &mut self.value {
            if options.is_empty() {
                return;
            }
            *selected = Some(match *selected {
                Some(0) | None => options.len() - 1,
                Some(i) => i - 1,
            });
        }
    }

    /// Clear the field value and its invalid flag
    pub fn clear(&mut self) {
        match &mut self.value {
            FieldValue::Text(s) => s.clear(),
            FieldValue::Choice { selected, .. } => *selected = None,
        }
        self.invalid = false;
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match &self.value {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Choice { selected: None, .. } => String::new(),
            FieldValue::Choice { .. } => format!("< {} >", self.as_text()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn services() -> Vec<String> {
        vec![
            "Consultation".to_string(),
            "Check-up".to_string(),
            "Cleaning".to_string(),
        ]
    }

    mod text_field {
        use super::*;

        #[test]
        fn test_push_and_pop() {
            let mut field = FormField::text("name", "Name", true, false);
            field.push_char('A');
            field.push_char('l');
            assert_eq!(field.as_text(), "Al");
            field.pop_char();
            assert_eq!(field.as_text(), "A");
        }

        #[test]
        fn test_single_line_ignores_newline() {
            let mut field = FormField::text("name", "Name", true, false);
            field.push_char('\n');
            assert_eq!(field.as_text(), "");
        }

        #[test]
        fn test_multiline_keeps_newline() {
            let mut field = FormField::text("message", "Message", false, true);
            field.push_char('a');
            field.push_char('\n');
            field.push_char('b');
            assert_eq!(field.as_text(), "a\nb");
        }

        #[test]
        fn test_push_str_flattens_line_breaks() {
            let mut field = FormField::text("name", "Name", true, false);
            field.push_str("Ada\r\nLovelace");
            assert_eq!(field.as_text(), "Ada  Lovelace");
        }

        #[test]
        fn test_clear_resets_invalid_flag() {
            let mut field = FormField::text("name", "Name", true, false);
            field.set_text("x".to_string());
            field.invalid = true;
            field.clear();
            assert_eq!(field.as_text(), "");
            assert!(!field.invalid);
        }
    }

    mod choice_field {
        use super::*;

        #[test]
        fn test_starts_unselected() {
            let field = FormField::choice("service", "Service", true, &services());
            assert!(field.is_choice());
            assert_eq!(field.as_text(), "");
            assert_eq!(field.display_value(), "");
        }

        #[test]
        fn test_next_choice_wraps() {
            let mut field = FormField::choice("service", "Service", true, &services());
            field.next_choice();
            assert_eq!(field.as_text(), "Consultation");
            field.next_choice();
            field.next_choice();
            field.next_choice();
            assert_eq!(field.as_text(), "Consultation");
        }

        #[test]
        fn test_prev_choice_from_none_selects_last() {
            let mut field = FormField::choice("service", "Service", true, &services());
            field.prev_choice();
            assert_eq!(field.as_text(), "Cleaning");
            field.prev_choice();
            assert_eq!(field.as_text(), "Check-up");
        }

        #[test]
        fn test_typing_jumps_to_matching_option() {
            let mut field = FormField::choice("service", "Service", true, &services());
            field.push_char('c');
            assert_eq!(field.as_text(), "Consultation");
            field.push_char('C');
            assert_eq!(field.as_text(), "Check-up");
            field.push_char('z');
            assert_eq!(field.as_text(), "Check-up");
        }

        #[test]
        fn test_set_text_selects_option() {
            let mut field = FormField::choice("service", "Service", true, &services());
            field.set_text("Cleaning".to_string());
            assert_eq!(field.as_text(), "Cleaning");
            field.set_text("Unknown".to_string());
            assert_eq!(field.as_text(), "");
        }

        #[test]
        fn test_pop_char_deselects() {
            let mut field = FormField::choice("service", "Service", true, &services());
            field.next_choice();
            field.pop_char();
            assert_eq!(field.as_text(), "");
        }

        #[test]
        fn test_empty_options_never_select() {
            let mut field = FormField::choice("service", "Service", true, &[]);
            field.next_choice();
            field.prev_choice();
            field.push_char('a');
            assert_eq!(field.as_text(), "");
        }

        #[test]
        fn test_display_value_shows_selection() {
            let mut field = FormField::choice("service", "Service", true, &services());
            field.next_choice();
            assert_eq!(field.display_value(), "< Consultation >");
        }
    }
}
