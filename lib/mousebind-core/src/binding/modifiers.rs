use log::warn;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeSet, HashSet};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Modifier {
    Cmd,
    Ctrl,
    Alt,
    Shift,
}

impl Modifier {
    pub const ALL: [Modifier; 4] = [Modifier::Cmd, Modifier::Ctrl, Modifier::Alt, Modifier::Shift];

    /// Case-insensitive lookup of a single word or symbol token
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_lowercase().as_str() {
            "cmd" | "command" | "⌘" => Some(Modifier::Cmd),
            "ctrl" | "control" | "⌃" => Some(Modifier::Ctrl),
            "alt" | "option" | "opt" | "⌥" => Some(Modifier::Alt),
            "shift" | "⇧" => Some(Modifier::Shift),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Modifier::Cmd => "cmd",
            Modifier::Ctrl => "ctrl",
            Modifier::Alt => "alt",
            Modifier::Shift => "shift",
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Modifier::Cmd => '⌘',
            Modifier::Ctrl => '⌃',
            Modifier::Alt => '⌥',
            Modifier::Shift => '⇧',
        }
    }

    fn is_symbol(c: char) -> bool {
        matches!(c, '⌘' | '⌃' | '⌥' | '⇧')
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A canonical set of held modifier keys. Two sets are equal only if they hold exactly the same keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub cmd: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a string like "cmd+shift", "Ctrl-Alt" or "⌘⇧" (case-insensitive, order-insensitive)
    pub fn parse(s: &str) -> Self {
        let mut modifiers = Modifiers::default();
        for token in tokenize(s) {
            match Modifier::from_token(&token) {
                Some(modifier) => modifiers.add(modifier),
                None => warn!("Ignoring unknown modifier '{token}' in '{s}'"),
            }
        }
        modifiers
    }

    pub fn add(&mut self, modifier: Modifier) {
        *self.slot(modifier) = true;
    }

    pub fn remove(&mut self, modifier: Modifier) {
        *self.slot(modifier) = false;
    }

    pub fn with(mut self, modifier: Modifier) -> Self {
        self.add(modifier);
        self
    }

    pub fn contains(&self, modifier: Modifier) -> bool {
        match modifier {
            Modifier::Cmd => self.cmd,
            Modifier::Ctrl => self.ctrl,
            Modifier::Alt => self.alt,
            Modifier::Shift => self.shift,
        }
    }

    pub fn any(&self) -> bool {
        self.cmd || self.ctrl || self.alt || self.shift
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        !self.any()
    }

    pub fn iter(&self) -> impl Iterator<Item = Modifier> + '_ {
        Modifier::ALL.into_iter().filter(|m| self.contains(*m))
    }

    pub fn symbols(&self) -> String {
        self.iter().map(|m| m.symbol()).collect()
    }

    fn slot(&mut self, modifier: Modifier) -> &mut bool {
        match modifier {
            Modifier::Cmd => &mut self.cmd,
            Modifier::Ctrl => &mut self.ctrl,
            Modifier::Alt => &mut self.alt,
            Modifier::Shift => &mut self.shift,
        }
    }
}

/// Splits on any non-alphanumeric character, except that each modifier symbol is its own token.
fn tokenize(s: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut word = String::new();
    for c in s.chars() {
        if c.is_alphanumeric() {
            word.push(c);
            continue;
        }
        if !word.is_empty() {
            tokens.push(std::mem::take(&mut word));
        }
        if Modifier::is_symbol(c) {
            tokens.push(c.to_string());
        }
    }
    if !word.is_empty() {
        tokens.push(word);
    }
    tokens
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = self.iter().map(|m| m.name()).collect();
        write!(f, "{}", parts.join("+"))
    }
}

impl FromIterator<Modifier> for Modifiers {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        let mut modifiers = Modifiers::default();
        for modifier in iter {
            modifiers.add(modifier);
        }
        modifiers
    }
}

/// Anything a caller may hand over as a modifier set.
pub trait IntoModifiers {
    fn into_modifiers(self) -> Modifiers;
}

impl IntoModifiers for Modifiers {
    fn into_modifiers(self) -> Modifiers {
        self
    }
}

impl IntoModifiers for Modifier {
    fn into_modifiers(self) -> Modifiers {
        Modifiers::default().with(self)
    }
}

impl IntoModifiers for &str {
    fn into_modifiers(self) -> Modifiers {
        Modifiers::parse(self)
    }
}

impl IntoModifiers for String {
    fn into_modifiers(self) -> Modifiers {
        Modifiers::parse(&self)
    }
}

impl IntoModifiers for &String {
    fn into_modifiers(self) -> Modifiers {
        Modifiers::parse(self)
    }
}

fn from_tokens<S: AsRef<str>>(tokens: impl IntoIterator<Item = S>) -> Modifiers {
    let mut modifiers = Modifiers::default();
    for token in tokens {
        for modifier in Modifiers::parse(token.as_ref()).iter() {
            modifiers.add(modifier);
        }
    }
    modifiers
}

impl IntoModifiers for &[&str] {
    fn into_modifiers(self) -> Modifiers {
        from_tokens(self.iter())
    }
}

impl<const N: usize> IntoModifiers for [&str; N] {
    fn into_modifiers(self) -> Modifiers {
        from_tokens(self)
    }
}

impl IntoModifiers for Vec<&str> {
    fn into_modifiers(self) -> Modifiers {
        from_tokens(self)
    }
}

impl IntoModifiers for Vec<String> {
    fn into_modifiers(self) -> Modifiers {
        from_tokens(self)
    }
}

impl IntoModifiers for &[Modifier] {
    fn into_modifiers(self) -> Modifiers {
        self.iter().copied().collect()
    }
}

impl IntoModifiers for Vec<Modifier> {
    fn into_modifiers(self) -> Modifiers {
        self.into_iter().collect()
    }
}

impl IntoModifiers for HashSet<Modifier> {
    fn into_modifiers(self) -> Modifiers {
        self.into_iter().collect()
    }
}

impl IntoModifiers for BTreeSet<Modifier> {
    fn into_modifiers(self) -> Modifiers {
        self.into_iter().collect()
    }
}

impl Serialize for Modifiers {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Modifiers {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ModifiersVisitor;
        impl<'de> Visitor<'de> for ModifiersVisitor {
            type Value = Modifiers;
            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a modifier string like 'cmd+shift' or a list of modifiers")
            }
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Modifiers::parse(v))
            }
            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut tokens: Vec<String> = Vec::new();
                while let Some(token) = seq.next_element::<String>()? {
                    tokens.push(token);
                }
                Ok(tokens.into_modifiers())
            }
            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Modifiers::default())
            }
        }
        deserializer.deserialize_any(ModifiersVisitor)
    }
}
