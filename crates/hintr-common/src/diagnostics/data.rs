//! Diagnostic message table and code constants.
//!
//! Codes are grouped by severity prefix; numbering follows the established
//! JSHint-family catalog so existing `-W###` directives keep working.

use super::DiagnosticMessage;

macro_rules! diagnostic_table {
    ($($name:ident = $code:literal => $message:literal,)*) => {
        pub mod diagnostic_codes {
            $(pub const $name: &str = $code;)*
        }

        pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
            $(DiagnosticMessage { code: $code, message: $message },)*
        ];
    };
}

diagnostic_table! {
    // Errors
    MISSING_USE_STRICT = "E007" => "Missing \"use strict\" statement.",
    WITH_IN_STRICT_MODE = "E010" => "'with' is not allowed in strict mode.",
    ALREADY_DECLARED = "E011" => "'{a}' has already been declared.",
    CONST_WITHOUT_INITIALIZER = "E012" => "const '{a}' is initialized to 'undefined'.",
    CONST_REASSIGNMENT = "E013" => "Attempting to override '{a}' which is a constant.",
    UNCLOSED_REGEXP = "E015" => "Unclosed regular expression.",
    INVALID_REGEXP_FLAG = "E016" => "Invalid regular expression flag '{a}'.",
    UNCLOSED_COMMENT = "E017" => "Unclosed comment.",
    UNMATCHED = "E019" => "Unmatched '{a}'.",
    EXPECTED_TO_MATCH = "E020" => "Expected '{a}' to match '{b}' from line {c} and instead saw '{d}'.",
    EXPECTED_INSTEAD_SAW = "E021" => "Expected '{a}' and instead saw '{b}'.",
    MISSING = "E023" => "Missing '{a}'.",
    UNEXPECTED = "E024" => "Unexpected '{a}'.",
    UNCLOSED_STRING = "E029" => "Unclosed string.",
    EXPECTED_IDENTIFIER = "E030" => "Expected an identifier and instead saw '{a}'.",
    BAD_ASSIGNMENT = "E031" => "Bad assignment.",
    UNRECOVERABLE_SYNTAX_ERROR = "E041" => "Unrecoverable syntax error. ({a}% scanned).",
    TOO_MANY_ERRORS = "E043" => "Too many errors. ({a}% scanned).",
    UNCLOSED_TEMPLATE = "E052" => "Unclosed template literal.",
    MISSING_SEMICOLON_FATAL = "E058" => "Missing semicolon.",
    BAD_ESCAPE = "E060" => "Bad escape sequence '{a}'.",
    MALFORMED_NUMBER = "E062" => "Malformed number '{a}'.",
    NESTING_TOO_DEEP = "E063" => "Nesting is too deep to continue.",

    // Warnings
    USED_BEFORE_DEFINED = "W003" => "'{a}' was used before it was defined.",
    ALREADY_DEFINED = "W004" => "'{a}' is already defined.",
    LEADING_DECIMAL = "W008" => "A leading decimal point can be confused with a dot: '{a}'.",
    ARRAY_CONSTRUCTOR = "W009" => "The array literal notation [] is preferable.",
    OBJECT_CONSTRUCTOR = "W010" => "The object literal notation {} is preferable.",
    MISLEADING_LINE_BREAK = "W014" => "Misleading line break before '{a}'; readers may interpret this as an expression boundary.",
    UNEXPECTED_USE = "W016" => "Unexpected use of '{a}'.",
    READ_ONLY = "W020" => "Read only.",
    RESERVED_WORD = "W024" => "Expected an identifier and instead saw '{a}' (a reserved word).",
    UNREACHABLE = "W027" => "Unreachable '{a}' after '{b}'.",
    EXPRESSION_STATEMENT = "W030" => "Expected an assignment or function call and instead saw an expression.",
    NEW_FOR_SIDE_EFFECTS = "W031" => "Do not use 'new' for side effects.",
    UNNECESSARY_SEMICOLON = "W032" => "Unnecessary semicolon.",
    MISSING_SEMICOLON = "W033" => "Missing semicolon.",
    USE_STRICT_COMPARISON = "W041" => "Use '{a}' to compare with '{b}'.",
    BAD_EOL_ESCAPE = "W043" => "Bad escaping of EOL. Use option multistr if needed.",
    TRAILING_DECIMAL = "W047" => "A trailing decimal point can be confused with a dot: '{a}'.",
    PRIMITIVE_CONSTRUCTOR = "W053" => "Do not use {a} as a constructor.",
    CONSTRUCTOR_NAME_CASE = "W055" => "A constructor name should start with an uppercase letter.",
    AVOID_ARGUMENTS_MEMBER = "W059" => "Avoid arguments.{a}.",
    EVAL_IS_EVIL = "W061" => "eval can be harmful.",
    TOO_MANY_STATEMENTS = "W071" => "This function has too many statements. ({a})",
    TOO_MANY_PARAMETERS = "W072" => "This function has too many parameters. ({a})",
    NESTED_TOO_DEEPLY = "W073" => "Blocks are nested too deeply. ({a})",
    COMPLEXITY_TOO_HIGH = "W074" => "This function's cyclomatic complexity is too high. ({a})",
    REDEFINITION = "W079" => "Redefinition of '{a}'.",
    FUNCTION_IN_LOOP = "W083" => "Don't make functions within a loop.",
    ASSIGNMENT_IN_CONDITION = "W084" => "Expected a conditional expression and instead saw an assignment.",
    WITH_STATEMENT = "W085" => "Don't use 'with'.",
    FALLS_THROUGH = "W086" => "Expected a 'break' statement before '{a}'.",
    DEBUGGER_STATEMENT = "W087" => "Forgotten 'debugger' statement?",
    UNFILTERED_FOR_IN = "W089" => "The body of a for in should be wrapped in an if statement to filter unwanted properties from the prototype.",
    NOT_A_LABEL = "W090" => "'{a}' is not a statement label.",
    UNUSED = "W098" => "'{a}' is defined but never used.",
    LINE_TOO_LONG = "W101" => "Line is too long.",
    WRONG_QUOTES = "W109" => "Strings must use {a}quote.",
    MIXED_QUOTES = "W110" => "Mixed double and single quotes.",
    OCTAL_IN_STRICT_MODE = "W115" => "Octal literals are not allowed in strict mode.",
    EXPECTED_AND_SAW = "W116" => "Expected '{a}' and instead saw '{b}'.",
    NOT_DEFINED = "W117" => "'{a}' is not defined.",
    EXTENDS_NATIVE_PROTOTYPE = "W121" => "Extending prototype of native object: '{a}'.",
    SHADOWS_OUTER = "W123" => "'{a}' is already defined in outer scope.",
    BAD_OPTION = "W140" => "Bad option: '{a}'.",
    BAD_OPTION_VALUE = "W141" => "Bad option value for '{a}': '{b}'.",
    UNMATCHED_DIRECTIVE = "W142" => "Unmatched '{a}' directive.",

    // Informational
    LAXCOMMA_HINT = "I001" => "Comma warnings can be turned off with 'laxcomma'.",
    LAXBREAK_HINT = "I003" => "Line breaks before operators can be allowed with 'laxbreak'.",
}
