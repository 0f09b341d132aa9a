use std::fmt;

use anyhow::Result;

#[cfg(test)]
#[path = "selector_test.rs"]
mod selector_test;

// compound selectors
//
// the controller only ever needs to find elements by tag, id, and class, so configured selectors
// are restricted to a single compound selector (no combinators, attributes, or pseudo-classes).
// the browser hands the string straight to querySelector, but parsing it here lets us reject
// anything the in-memory page used by the tests could not match the same way
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selector {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
}

impl Selector {
    pub fn parse(text: &str) -> Result<Selector> {
        let text = text.trim();

        if text.is_empty() {
            return Err(anyhow::Error::msg("empty selector"));
        }

        let mut selector = Selector::default();

        // split on the '#' and '.' sigils while keeping track of which one started the part
        let mut sigil = None;
        let mut part = String::new();

        for c in text.chars() {
            match c {
                '#' | '.' => {
                    selector.push(sigil, &part, text)?;
                    sigil = Some(c);
                    part.clear();
                }
                c if c.is_ascii_alphanumeric() || c == '-' || c == '_' => part.push(c),
                c => {
                    return Err(anyhow::Error::msg(format!(
                        "unsupported character '{c}' in selector \"{text}\""
                    )));
                }
            }
        }
        selector.push(sigil, &part, text)?;

        Ok(selector)
    }

    fn push(&mut self, sigil: Option<char>, part: &str, text: &str) -> Result<()> {
        match sigil {
            // leading tag name, which may be absent
            None if part.is_empty() => {}
            None => self.tag = Some(part.to_ascii_lowercase()),
            Some(_) if part.is_empty() => {
                return Err(anyhow::Error::msg(format!("dangling sigil in selector \"{text}\"")));
            }
            Some('#') if self.id.is_some() => {
                return Err(anyhow::Error::msg(format!("multiple ids in selector \"{text}\"")));
            }
            Some('#') => self.id = Some(part.to_owned()),
            Some(_) => self.classes.push(part.to_owned()),
        }

        Ok(())
    }

    pub fn matches(&self, tag: &str, id: Option<&str>, classes: &[String]) -> bool {
        if let Some(want) = &self.tag {
            if !want.eq_ignore_ascii_case(tag) {
                return false;
            }
        }

        if let Some(want) = &self.id {
            if id != Some(want.as_str()) {
                return false;
            }
        }

        self.classes.iter().all(|want| classes.contains(want))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(tag) = &self.tag {
            write!(f, "{tag}")?;
        }

        if let Some(id) = &self.id {
            write!(f, "#{id}")?;
        }

        for class in &self.classes {
            write!(f, ".{class}")?;
        }

        Ok(())
    }
}
