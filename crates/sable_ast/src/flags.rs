//! Flag sets carried by tokens and nodes.

bitflags::bitflags! {
    /// Flags produced by the tokenizer alongside each token.
    ///
    /// `PRECEDING_LINE_BREAK` is the flag consulted by the parser's ASI and
    /// no-line-terminator predicates; the rest describe literal shape.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TokenFlags: u16 {
        const NONE                   = 0;
        /// A line terminator occurred between the previous token and this one.
        const PRECEDING_LINE_BREAK   = 1 << 0;
        /// The literal ran into end of input before its closing delimiter.
        const UNTERMINATED           = 1 << 1;
        const SCIENTIFIC             = 1 << 2;
        const HEX_SPECIFIER          = 1 << 3;
        const BINARY_SPECIFIER       = 1 << 4;
        const OCTAL_SPECIFIER        = 1 << 5;
        const CONTAINS_SEPARATOR     = 1 << 6;

        const NUMERIC_LITERAL_FLAGS = Self::SCIENTIFIC.bits()
            | Self::HEX_SPECIFIER.bits()
            | Self::BINARY_SPECIFIER.bits()
            | Self::OCTAL_SPECIFIER.bits()
            | Self::CONTAINS_SEPARATOR.bits();
    }
}

bitflags::bitflags! {
    /// Flags on constructed nodes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u16 {
        const NONE  = 0;
        /// Variable declaration list introduced with `let`.
        const LET   = 1 << 0;
        /// Variable declaration list introduced with `const`.
        const CONST = 1 << 1;

        const BLOCK_SCOPED = Self::LET.bits() | Self::CONST.bits();
    }
}

bitflags::bitflags! {
    /// Declaration modifiers recorded while parsing modifier sequences.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ModifierFlags: u16 {
        const NONE      = 0;
        const EXPORT    = 1 << 0;
        const DEFAULT   = 1 << 1;
        const DECLARE   = 1 << 2;
        const PUBLIC    = 1 << 3;
        const PRIVATE   = 1 << 4;
        const PROTECTED = 1 << 5;
        const STATIC    = 1 << 6;
        const READONLY  = 1 << 7;
        const ABSTRACT  = 1 << 8;
        const ASYNC     = 1 << 9;
        const OVERRIDE  = 1 << 10;

        const ACCESSIBILITY = Self::PUBLIC.bits() | Self::PRIVATE.bits() | Self::PROTECTED.bits();
    }
}
