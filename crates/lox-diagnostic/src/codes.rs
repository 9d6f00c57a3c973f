//! Error codes for Lox diagnostics.

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Lexer errors (E0001 - E0099)
    UnexpectedCharacter,
    UnterminatedString,

    // Parser errors (E0100 - E0199)
    UnexpectedToken,
    ExpectedExpression,
    MissingSemicolon,
    InvalidAssignmentTarget,
    TooManyArguments,
    TopLevelReturn,
    SelfInheritance,

    // Runtime errors (E0300 - E0399)
    UndefinedVariable,
    UndefinedProperty,
    OperandType,
    NotCallable,
    WrongArity,
    NotAnInstance,
    SuperclassNotClass,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            // Lexer
            ErrorCode::UnexpectedCharacter => "E0001",
            ErrorCode::UnterminatedString => "E0002",

            // Parser
            ErrorCode::UnexpectedToken => "E0100",
            ErrorCode::ExpectedExpression => "E0101",
            ErrorCode::MissingSemicolon => "E0102",
            ErrorCode::InvalidAssignmentTarget => "E0103",
            ErrorCode::TooManyArguments => "E0104",
            ErrorCode::TopLevelReturn => "E0105",
            ErrorCode::SelfInheritance => "E0106",

            // Runtime
            ErrorCode::UndefinedVariable => "E0300",
            ErrorCode::UndefinedProperty => "E0301",
            ErrorCode::OperandType => "E0302",
            ErrorCode::NotCallable => "E0303",
            ErrorCode::WrongArity => "E0304",
            ErrorCode::NotAnInstance => "E0305",
            ErrorCode::SuperclassNotClass => "E0306",
        }
    }

    /// Get a human-readable description of the error.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::UnexpectedCharacter => "unexpected character in input",
            ErrorCode::UnterminatedString => "string literal is not terminated",

            ErrorCode::UnexpectedToken => "unexpected token",
            ErrorCode::ExpectedExpression => "expected an expression",
            ErrorCode::MissingSemicolon => "missing semicolon",
            ErrorCode::InvalidAssignmentTarget => "left-hand side cannot be assigned to",
            ErrorCode::TooManyArguments => "more than 255 arguments or parameters",
            ErrorCode::TopLevelReturn => "`return` outside of a function",
            ErrorCode::SelfInheritance => "class inherits from itself",

            ErrorCode::UndefinedVariable => "cannot find variable in any enclosing scope",
            ErrorCode::UndefinedProperty => "instance has no such field or method",
            ErrorCode::OperandType => "operator cannot be applied to these operands",
            ErrorCode::NotCallable => "value is not a function or class",
            ErrorCode::WrongArity => "wrong number of arguments",
            ErrorCode::NotAnInstance => "only instances have properties",
            ErrorCode::SuperclassNotClass => "superclass is not a class",
        }
    }

    /// Get a suggested fix for the error, if available.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            ErrorCode::UnterminatedString => Some("add a closing quote `\"` to terminate the string"),
            ErrorCode::MissingSemicolon => Some("add `;` at the end of the statement"),
            ErrorCode::UndefinedVariable => {
                Some("declare the variable with `var` before using or assigning it")
            }
            ErrorCode::WrongArity => {
                Some("check the function declaration for the expected number of arguments")
            }
            ErrorCode::InvalidAssignmentTarget => {
                Some("only variables and instance fields can be assigned")
            }
            _ => None,
        }
    }
}
