//! The recursive-descent expression engine and its configuration builder.
//!
//! # Grammar
//!
//! - `expr := or_term (',' or_term)*` — `,` is OR and binds loosest
//! - `or_term := and_term (';' and_term)*` — `;` is AND
//! - `and_term := '(' expr ')' | key op value` — parentheses nest freely
//! - `op` matches `[!=][^=()]*=`; list operators take `(v1,v2,...)` values
//!
//! A [`Parser`] is built once through [`ParserBuilder`], is immutable
//! afterwards, and can be shared across threads for concurrent
//! [`process`](Parser::process) calls as long as the supplied formatters and
//! key transformers are pure. Processing is synchronous and recursion depth
//! follows the authored grouping depth; no explicit cap is enforced.

use std::collections::HashSet;

use crate::codec;
use crate::error::{ConfigError, ParseError};
use crate::operator::{self, Operator};
use crate::scan;


/// Renders the collected terms of an AND- or OR-list into the target's
/// boolean syntax. Implementations must cover zero, one and many terms;
/// a single term passes through without combinator wrapping.
pub type BoolFormatter = Box<dyn Fn(&[String]) -> String + Send + Sync>;

/// Rewrites a key before the key policy runs and the leaf is rendered.
pub type KeyTransformer = Box<dyn Fn(&str) -> String + Send + Sync>;

/// Builder for [`Parser`].
///
/// Operators and key transformers are append-only and keep registration
/// order: operator lookup is first-match, transformers compose
/// left-to-right. All validation happens in [`build`](Self::build), never
/// at process time.
#[derive(Default)]
pub struct ParserBuilder {
    operators: Vec<Operator>,
    and_formatter: Option<BoolFormatter>,
    or_formatter: Option<BoolFormatter>,
    key_transformers: Vec<KeyTransformer>,
}

impl ParserBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the MongoDB profile: the default operator set plus both
    /// boolean formatters from [`crate::mongo`].
    pub fn mongo(mut self) -> Self {
        self.operators.extend(crate::mongo::operators());
        self.and_formatter = Some(Box::new(crate::mongo::and_formatter));
        self.or_formatter = Some(Box::new(crate::mongo::or_formatter));
        self
    }

    /// Append a custom operator.
    pub fn operator(mut self, op: Operator) -> Self {
        self.operators.push(op);
        self
    }

    /// Append several custom operators in order.
    pub fn operators(mut self, ops: impl IntoIterator<Item = Operator>) -> Self {
        self.operators.extend(ops);
        self
    }

    /// Set the AND combinator.
    pub fn and_formatter(
        mut self,
        f: impl Fn(&[String]) -> String + Send + Sync + 'static,
    ) -> Self {
        self.and_formatter = Some(Box::new(f));
        self
    }

    /// Set the OR combinator. Its zero-term case defines how an empty
    /// expression renders.
    pub fn or_formatter(
        mut self,
        f: impl Fn(&[String]) -> String + Send + Sync + 'static,
    ) -> Self {
        self.or_formatter = Some(Box::new(f));
        self
    }

    /// Append a key transformer.
    pub fn key_transformer(
        mut self,
        f: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        self.key_transformers.push(Box::new(f));
        self
    }

    /// Validate the configuration and freeze it into a [`Parser`].
    ///
    /// Fails if either combinator is missing, if an operator token breaks
    /// the registration grammar, or if a token is registered twice.
    pub fn build(self) -> Result<Parser, ConfigError> {
        let and_formatter = self.and_formatter.ok_or(ConfigError::MissingAndFormatter)?;
        let or_formatter = self.or_formatter.ok_or(ConfigError::MissingOrFormatter)?;

        let mut seen = HashSet::new();
        for op in &self.operators {
            if !operator::valid_token(op.token()) {
                return Err(ConfigError::InvalidOperator(op.token().to_string()));
            }
            if !seen.insert(op.token().to_string()) {
                return Err(ConfigError::DuplicateOperator(op.token().to_string()));
            }
        }

        Ok(Parser {
            operators: self.operators,
            and_formatter,
            or_formatter,
            key_transformers: self.key_transformers,
        })
    }
}

/// Per-call key policy.
///
/// The deny-list is checked first; when an allow-list is configured every
/// key must appear in it. Both match against the key *after* transformers
/// have run.
#[derive(Debug, Clone, Default)]
pub struct ProcessOptions {
    allowed_keys: Option<HashSet<String>>,
    forbidden_keys: Option<HashSet<String>>,
}

impl ProcessOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict querying to the given keys.
    pub fn allow_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_keys = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    /// Reject the given keys.
    pub fn forbid_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.forbidden_keys = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    fn check(&self, key: &str) -> Result<(), ParseError> {
        if self
            .forbidden_keys
            .as_ref()
            .is_some_and(|keys| keys.contains(key))
        {
            return Err(ParseError::KeyNotAllowed(key.to_string()));
        }
        if self
            .allowed_keys
            .as_ref()
            .is_some_and(|keys| !keys.contains(key))
        {
            return Err(ParseError::KeyNotAllowed(key.to_string()));
        }
        Ok(())
    }
}

/// A configured expression parser.
pub struct Parser {
    operators: Vec<Operator>,
    and_formatter: BoolFormatter,
    or_formatter: BoolFormatter,
    key_transformers: Vec<KeyTransformer>,
}

impl Parser {
    /// Translate an expression with no key restrictions.
    pub fn process(&self, expression: &str) -> Result<String, ParseError> {
        self.process_with(expression, &ProcessOptions::default())
    }

    /// Translate an expression, enforcing the given key policy on every
    /// leaf, including leaves inside nested groups.
    pub fn process_with(
        &self,
        expression: &str,
        options: &ProcessOptions,
    ) -> Result<String, ParseError> {
        // Escapes are encoded before the first scan and decoded only after
        // the entire tree has been rendered; intermediate recursion levels
        // must never see or undo placeholders.
        let encoded = codec::encode(expression);
        let rendered = self.process_encoded(&encoded, options)?;
        Ok(codec::decode(&rendered))
    }

    fn process_encoded(&self, s: &str, options: &ProcessOptions) -> Result<String, ParseError> {
        let mut or_terms = Vec::new();
        for (or_start, or_end) in scan::find_parts(s, &[','], None)? {
            let or_span = &s[or_start..or_end];
            let mut and_terms = Vec::new();
            for (and_start, and_end) in scan::find_parts(or_span, &[';'], None)? {
                let term = &or_span[and_start..and_end];
                and_terms.push(self.process_term(term, options)?);
            }
            or_terms.push((self.and_formatter)(&and_terms));
        }
        Ok((self.or_formatter)(&or_terms))
    }

    /// An AND-term wrapped entirely in one grouping pair is a nested
    /// sub-expression and re-parses from the top; anything else must be a
    /// leaf operation. This is the sole grouping rule, arbitrary nesting
    /// depth falls out of the recursion.
    fn process_term(&self, term: &str, options: &ProcessOptions) -> Result<String, ParseError> {
        let groups = scan::find_outer_parentheses(term, None)?;
        if let [(open, close)] = groups[..] {
            if open == 0 && close == term.len() - 1 {
                return self.process_encoded(&term[1..close], options);
            }
        }
        self.process_operation(term, options)
    }

    fn process_operation(
        &self,
        operation: &str,
        options: &ProcessOptions,
    ) -> Result<String, ParseError> {
        let (op_start, op_end) = operator::find_operator(operation)
            .ok_or_else(|| ParseError::IncompleteOperation(operation.to_string()))?;
        let token = &operation[op_start..op_end];
        let raw_key = &operation[..op_start];
        let value = &operation[op_end..];
        if raw_key.is_empty() || value.is_empty() {
            return Err(ParseError::IncompleteOperation(operation.to_string()));
        }

        let mut key = raw_key.to_string();
        for transform in &self.key_transformers {
            key = transform(&key);
        }
        options.check(&key)?;

        let op = self
            .operators
            .iter()
            .find(|op| op.token() == token)
            .ok_or_else(|| ParseError::UnknownOperator {
                operator: token.to_string(),
                operation: operation.to_string(),
            })?;
        Ok(op.format(&key, value))
    }
}

impl std::fmt::Debug for Parser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("operators", &self.operators)
            .field("key_transformers", &self.key_transformers.len())
            .finish_non_exhaustive()
    }
}
