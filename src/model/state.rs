//! States and state vocabularies.
//!
//! Provides [State], a single named symbol of a discrete alphabet, and
//! [States], a named vocabulary owning its states. A state may be
//! *ambiguous*: it then represents a set of other same-alphabet states,
//! tagged [Uncertain](Ambiguity::Uncertain) ("one of") or
//! [Polymorphic](Ambiguity::Polymorphic) ("all of"), and carries the member
//! references as ordered state ids. Member resolution, including cycle
//! detection, is checked by [`States::validate_members`].

use crate::model::alphabet::{Alphabet, Symbol};
use crate::model::error::CharacterError;
use indexmap::IndexMap;

// =#========================================================================#=
// AMBIGUITY
// =#========================================================================#=
/// The ambiguity kind of a [State].
///
/// A state is exactly one of plain, uncertain, or polymorphic; the two
/// ambiguous kinds require a non-empty member set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ambiguity {
    /// A plain, concrete state.
    #[default]
    None,
    /// One of the member states, which one is not known.
    Uncertain,
    /// All of the member states at once.
    Polymorphic,
}

// =#========================================================================#=
// STATE
// =#========================================================================#=
/// A single state of a discrete alphabet: an identified symbol, optionally
/// labelled, optionally ambiguous.
///
/// Members of an ambiguous state are stored as ordered ids referencing
/// sibling states of the owning [States] vocabulary; they are resolved (and
/// checked for cycles) by [`States::validate_members`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    id: String,
    alphabet: Alphabet,
    symbol: Option<Symbol>,
    label: Option<String>,
    ambiguity: Ambiguity,
    members: Vec<String>,
}

impl State {
    /// Creates a plain state with the given symbol.
    ///
    /// # Arguments
    /// * `alphabet` - The alphabet this state belongs to (not Continuous)
    /// * `id` - Identifier, unique within the owning vocabulary
    /// * `symbol` - Raw symbol token, validated against the alphabet
    ///
    /// # Errors
    /// [CharacterError::SchemaViolation] for the Continuous alphabet (it
    /// has no states); [CharacterError::TokenError] if the symbol fails the
    /// alphabet's grammar.
    pub fn new(alphabet: Alphabet, id: &str, symbol: &str) -> Result<State, CharacterError> {
        State::create(alphabet, id, Some(symbol), Ambiguity::None)
    }

    /// Creates a plain state without a symbol.
    ///
    /// # Errors
    /// [CharacterError::SchemaViolation] for the Continuous alphabet.
    pub fn without_symbol(alphabet: Alphabet, id: &str) -> Result<State, CharacterError> {
        State::create(alphabet, id, None, Ambiguity::None)
    }

    /// Creates an uncertain state ("one of its members").
    ///
    /// # Errors
    /// As for [`State::new`]; the symbol is optional.
    pub fn uncertain(
        alphabet: Alphabet,
        id: &str,
        symbol: Option<&str>,
    ) -> Result<State, CharacterError> {
        State::create(alphabet, id, symbol, Ambiguity::Uncertain)
    }

    /// Creates a polymorphic state ("all of its members").
    ///
    /// # Errors
    /// As for [`State::new`]; the symbol is optional.
    pub fn polymorphic(
        alphabet: Alphabet,
        id: &str,
        symbol: Option<&str>,
    ) -> Result<State, CharacterError> {
        State::create(alphabet, id, symbol, Ambiguity::Polymorphic)
    }

    fn create(
        alphabet: Alphabet,
        id: &str,
        symbol: Option<&str>,
        ambiguity: Ambiguity,
    ) -> Result<State, CharacterError> {
        if !alphabet.has_states() {
            return Err(CharacterError::SchemaViolation(format!(
                "the {alphabet} alphabet has no states"
            )));
        }
        let symbol = symbol.map(|s| alphabet.validate_symbol(s)).transpose()?;
        Ok(State {
            id: id.to_string(),
            alphabet,
            symbol,
            label: None,
            ambiguity,
            members: Vec::new(),
        })
    }

    /// Attaches a label to this state.
    pub fn with_label(mut self, label: &str) -> State {
        self.label = Some(label.to_string());
        self
    }

    /// Returns the identifier of this state.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the alphabet of this state.
    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    /// Returns the symbol of this state, if set.
    pub fn symbol(&self) -> Option<&Symbol> {
        self.symbol.as_ref()
    }

    /// Returns the label of this state, if set.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns the ambiguity kind of this state.
    pub fn ambiguity(&self) -> Ambiguity {
        self.ambiguity
    }

    /// Returns whether this state is uncertain or polymorphic.
    pub fn is_ambiguous(&self) -> bool {
        self.ambiguity != Ambiguity::None
    }

    /// Returns whether this state is uncertain.
    pub fn is_uncertain(&self) -> bool {
        self.ambiguity == Ambiguity::Uncertain
    }

    /// Returns whether this state is polymorphic.
    pub fn is_polymorphic(&self) -> bool {
        self.ambiguity == Ambiguity::Polymorphic
    }

    /// Adds a member to this ambiguous state, keyed by the member's id.
    ///
    /// # Arguments
    /// * `member` - A sibling state of the same alphabet, not `self`
    ///
    /// # Errors
    /// [CharacterError::AmbiguityError] if this state is not ambiguous, if
    /// the member's alphabet differs, or if the member is this state
    /// itself. Adding the same member twice is a no-op.
    pub fn add_member(&mut self, member: &State) -> Result<(), CharacterError> {
        if !self.is_ambiguous() {
            return Err(CharacterError::AmbiguityError(format!(
                "state '{}' is not ambiguous and cannot have members",
                self.id
            )));
        }
        if member.alphabet != self.alphabet {
            return Err(CharacterError::AmbiguityError(format!(
                "{} member expected for state '{}', got {}",
                self.alphabet, self.id, member.alphabet
            )));
        }
        self.add_member_id(member.id())
    }

    /// Adds a member by id without resolving it; used by the reader, which
    /// defers resolution to [`States::validate_members`].
    pub(crate) fn add_member_id(&mut self, member_id: &str) -> Result<(), CharacterError> {
        if !self.is_ambiguous() {
            return Err(CharacterError::AmbiguityError(format!(
                "state '{}' is not ambiguous and cannot have members",
                self.id
            )));
        }
        if member_id == self.id {
            return Err(CharacterError::AmbiguityError(format!(
                "state '{}' cannot be a member of itself",
                self.id
            )));
        }
        if !self.members.iter().any(|m| m == member_id) {
            self.members.push(member_id.to_string());
        }
        Ok(())
    }

    /// Returns the member ids of this state in insertion order.
    pub fn members(&self) -> &[String] {
        &self.members
    }
}

// =#========================================================================#=
// STATES
// =#========================================================================#=
/// A named vocabulary of [State]s, all of one alphabet.
///
/// The vocabulary owns its states exclusively and stores them by id.
/// Adding a state under an id that is already present *overwrites* the
/// stored state (last write wins).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct States {
    id: String,
    alphabet: Alphabet,
    label: Option<String>,
    state_set: IndexMap<String, State>,
}

impl States {
    /// Creates an empty vocabulary.
    ///
    /// # Errors
    /// [CharacterError::SchemaViolation] for the Continuous alphabet.
    pub fn new(alphabet: Alphabet, id: &str) -> Result<States, CharacterError> {
        if !alphabet.has_states() {
            return Err(CharacterError::SchemaViolation(format!(
                "the {alphabet} alphabet has no state vocabularies"
            )));
        }
        Ok(States {
            id: id.to_string(),
            alphabet,
            label: None,
            state_set: IndexMap::new(),
        })
    }

    /// Attaches a label to this vocabulary.
    pub fn with_label(mut self, label: &str) -> States {
        self.label = Some(label.to_string());
        self
    }

    /// Returns the identifier of this vocabulary.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the alphabet of this vocabulary.
    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    /// Returns the label of this vocabulary, if set.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Adds a state, keyed by its id. A repeated id overwrites the stored
    /// state silently.
    ///
    /// # Errors
    /// [CharacterError::SchemaViolation] if the state's alphabet differs
    /// from this vocabulary's.
    pub fn add_state(&mut self, state: State) -> Result<(), CharacterError> {
        if state.alphabet() != self.alphabet {
            return Err(CharacterError::SchemaViolation(format!(
                "{} state expected for vocabulary '{}', got {}",
                self.alphabet,
                self.id,
                state.alphabet()
            )));
        }
        self.state_set.insert(state.id().to_string(), state);
        Ok(())
    }

    /// Returns the state with the given id, or [None].
    pub fn get(&self, id: &str) -> Option<&State> {
        self.state_set.get(id)
    }

    /// Returns whether a state with the given id is stored.
    pub fn has(&self, id: &str) -> bool {
        self.state_set.contains_key(id)
    }

    /// Returns an iterator over the stored states in insertion order.
    pub fn states(&self) -> impl Iterator<Item = &State> {
        self.state_set.values()
    }

    /// Returns the number of stored states.
    pub fn len(&self) -> usize {
        self.state_set.len()
    }

    /// Returns whether the vocabulary is empty.
    pub fn is_empty(&self) -> bool {
        self.state_set.is_empty()
    }

    /// Validates the ambiguity mappings of this vocabulary:
    /// * every ambiguous state has at least one member,
    /// * no plain state has members,
    /// * every member id resolves within this vocabulary,
    /// * member chains terminate in concrete states (no cycles).
    ///
    /// # Errors
    /// [CharacterError::AmbiguityError] describing the first violation
    /// found.
    pub fn validate_members(&self) -> Result<(), CharacterError> {
        for state in self.state_set.values() {
            if state.is_ambiguous() && state.members().is_empty() {
                return Err(CharacterError::AmbiguityError(format!(
                    "ambiguous state '{}' has no members",
                    state.id()
                )));
            }
            if !state.is_ambiguous() && !state.members().is_empty() {
                return Err(CharacterError::AmbiguityError(format!(
                    "plain state '{}' must not have members",
                    state.id()
                )));
            }
        }

        let mut trail = Vec::new();
        for id in self.state_set.keys() {
            self.check_resolvable(id, &mut trail)?;
        }
        Ok(())
    }

    /// Walks the member references of the state with the given id,
    /// erroring on unresolved ids and on cycles.
    fn check_resolvable(
        &self,
        id: &str,
        trail: &mut Vec<String>,
    ) -> Result<(), CharacterError> {
        if trail.iter().any(|seen| seen == id) {
            return Err(CharacterError::AmbiguityError(format!(
                "cyclic member reference through state '{id}'"
            )));
        }
        let Some(state) = self.get(id) else {
            return Err(CharacterError::AmbiguityError(format!(
                "member '{id}' does not resolve to a state"
            )));
        };

        trail.push(id.to_string());
        for member in state.members() {
            self.check_resolvable(member, trail)?;
        }
        trail.pop();
        Ok(())
    }
}
