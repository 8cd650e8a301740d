//! Shared test fixtures: a small script-language grammar and hand-built
//! trees shaped like the output of its parser.
//!
//! The grammar is the classic teaching one: a `script` of functions and
//! statements, `vardef`s, `block`s in braces, `ID`/`NUM`/`STR` tokens.
//! Trees are assembled through [`TreeBuilder`], which lays tokens out in
//! a source buffer one space apart so that `SyntaxNode::text` yields
//! readable program fragments.

use rowan::{TextRange, TextSize};
use treepath_core::{RuleTypeId, StaticTypeRegistry, SyntaxNode, TokenTypeId};

// Rule kinds.
pub const SCRIPT: RuleTypeId = 1;
pub const FUNCTION: RuleTypeId = 2;
pub const FORMAL_ARGS: RuleTypeId = 3;
pub const BLOCK: RuleTypeId = 4;
pub const STATEMENT: RuleTypeId = 5;
pub const VARDEF: RuleTypeId = 6;
pub const EXPR: RuleTypeId = 7;
pub const TYPE: RuleTypeId = 8;

// Token kinds.
pub const ID: TokenTypeId = 1;
pub const NUM: TokenTypeId = 2;
pub const STR: TokenTypeId = 3;
pub const FUNC_KW: TokenTypeId = 4;
pub const VAR_KW: TokenTypeId = 5;
pub const WHILE_KW: TokenTypeId = 6;
pub const IF_KW: TokenTypeId = 7;
pub const RETURN_KW: TokenTypeId = 8;
pub const FALSE_KW: TokenTypeId = 9;
pub const LPAREN: TokenTypeId = 10;
pub const RPAREN: TokenTypeId = 11;
pub const LBRACE: TokenTypeId = 12;
pub const RBRACE: TokenTypeId = 13;
pub const EQ: TokenTypeId = 14;
pub const COLON: TokenTypeId = 15;
pub const BASIC_TYPE: TokenTypeId = 16;

// Sorted by name for binary search.
static RULES: [(&str, RuleTypeId); 8] = [
    ("block", BLOCK),
    ("expr", EXPR),
    ("formal_args", FORMAL_ARGS),
    ("function", FUNCTION),
    ("script", SCRIPT),
    ("statement", STATEMENT),
    ("type", TYPE),
    ("vardef", VARDEF),
];

static TOKENS: [(&str, TokenTypeId); 16] = [
    ("BASIC_TYPE", BASIC_TYPE),
    ("COLON", COLON),
    ("EQ", EQ),
    ("FALSE", FALSE_KW),
    ("FUNC", FUNC_KW),
    ("ID", ID),
    ("IF", IF_KW),
    ("LBRACE", LBRACE),
    ("LPAREN", LPAREN),
    ("NUM", NUM),
    ("RBRACE", RBRACE),
    ("RETURN", RETURN_KW),
    ("RPAREN", RPAREN),
    ("STR", STR),
    ("VAR", VAR_KW),
    ("WHILE", WHILE_KW),
];

pub static REGISTRY: StaticTypeRegistry = StaticTypeRegistry::new(&RULES, &TOKENS);

/// Lays tokens out in a growing source buffer, one space apart, so every
/// leaf gets a correct span without hand-computed offsets.
#[derive(Default)]
pub struct TreeBuilder {
    source: String,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(&mut self, kind: TokenTypeId, text: &str) -> SyntaxNode {
        if !self.source.is_empty() {
            self.source.push(' ');
        }
        let start = TextSize::of(self.source.as_str());
        self.source.push_str(text);
        let end = TextSize::of(self.source.as_str());
        SyntaxNode::token(kind, text, TextRange::new(start, end))
    }

    pub fn finish(self) -> String {
        self.source
    }
}

pub fn rule(kind: RuleTypeId, children: Vec<SyntaxNode>) -> SyntaxNode {
    SyntaxNode::rule(kind, children)
}

/// A built tree together with the source text its spans index into.
pub struct Fixture {
    pub source: String,
    pub tree: SyntaxNode,
}

impl Fixture {
    /// Texts of the given nodes, one per line, the shape every
    /// result-listing snapshot uses.
    pub fn texts(&self, nodes: &[&SyntaxNode]) -> String {
        nodes
            .iter()
            .map(|node| node.text(&self.source))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// `var x = 1`
pub fn single_vardef() -> Fixture {
    let mut b = TreeBuilder::new();
    let vardef = rule(
        VARDEF,
        vec![
            b.token(VAR_KW, "var"),
            b.token(ID, "x"),
            b.token(EQ, "="),
            rule(EXPR, vec![b.token(NUM, "1")]),
        ],
    );
    let tree = rule(SCRIPT, vec![vardef]);
    Fixture {
        source: b.finish(),
        tree,
    }
}

/// Two top-level vardefs: `var x = 1  var y = 2`
pub fn multi_vardef() -> Fixture {
    let mut b = TreeBuilder::new();
    let first = rule(
        VARDEF,
        vec![
            b.token(VAR_KW, "var"),
            b.token(ID, "x"),
            b.token(EQ, "="),
            rule(EXPR, vec![b.token(NUM, "1")]),
        ],
    );
    let second = rule(
        VARDEF,
        vec![
            b.token(VAR_KW, "var"),
            b.token(ID, "y"),
            b.token(EQ, "="),
            rule(EXPR, vec![b.token(NUM, "2")]),
        ],
    );
    let tree = rule(SCRIPT, vec![first, second]);
    Fixture {
        source: b.finish(),
        tree,
    }
}

/// Three functions `f`, `g`, `h`, with identifiers appearing in source
/// order `f x y x x g x y h z`:
///
/// ```text
/// func f ( x : int ) { var y = x  x = 1 }
/// func g ( x : int ) { y = "sdflkjsdf" }
/// func h ( ) : boolean { var z = 9  return false }
/// ```
pub fn script_with_functions() -> Fixture {
    let mut b = TreeBuilder::new();

    let f = {
        let func = b.token(FUNC_KW, "func");
        let name = b.token(ID, "f");
        let lparen = b.token(LPAREN, "(");
        let args = rule(
            FORMAL_ARGS,
            vec![
                b.token(ID, "x"),
                b.token(COLON, ":"),
                rule(TYPE, vec![b.token(BASIC_TYPE, "int")]),
            ],
        );
        let rparen = b.token(RPAREN, ")");
        let block = rule(
            BLOCK,
            vec![
                b.token(LBRACE, "{"),
                rule(
                    VARDEF,
                    vec![
                        b.token(VAR_KW, "var"),
                        b.token(ID, "y"),
                        b.token(EQ, "="),
                        rule(EXPR, vec![b.token(ID, "x")]),
                    ],
                ),
                rule(
                    STATEMENT,
                    vec![
                        b.token(ID, "x"),
                        b.token(EQ, "="),
                        rule(EXPR, vec![b.token(NUM, "1")]),
                    ],
                ),
                b.token(RBRACE, "}"),
            ],
        );
        rule(FUNCTION, vec![func, name, lparen, args, rparen, block])
    };

    let g = {
        let func = b.token(FUNC_KW, "func");
        let name = b.token(ID, "g");
        let lparen = b.token(LPAREN, "(");
        let args = rule(
            FORMAL_ARGS,
            vec![
                b.token(ID, "x"),
                b.token(COLON, ":"),
                rule(TYPE, vec![b.token(BASIC_TYPE, "int")]),
            ],
        );
        let rparen = b.token(RPAREN, ")");
        let block = rule(
            BLOCK,
            vec![
                b.token(LBRACE, "{"),
                rule(
                    STATEMENT,
                    vec![
                        b.token(ID, "y"),
                        b.token(EQ, "="),
                        rule(EXPR, vec![b.token(STR, "\"sdflkjsdf\"")]),
                    ],
                ),
                b.token(RBRACE, "}"),
            ],
        );
        rule(FUNCTION, vec![func, name, lparen, args, rparen, block])
    };

    let h = {
        let func = b.token(FUNC_KW, "func");
        let name = b.token(ID, "h");
        let lparen = b.token(LPAREN, "(");
        let rparen = b.token(RPAREN, ")");
        let colon = b.token(COLON, ":");
        let ty = rule(TYPE, vec![b.token(BASIC_TYPE, "boolean")]);
        let block = rule(
            BLOCK,
            vec![
                b.token(LBRACE, "{"),
                rule(
                    VARDEF,
                    vec![
                        b.token(VAR_KW, "var"),
                        b.token(ID, "z"),
                        b.token(EQ, "="),
                        rule(EXPR, vec![b.token(NUM, "9")]),
                    ],
                ),
                rule(
                    STATEMENT,
                    vec![
                        b.token(RETURN_KW, "return"),
                        rule(EXPR, vec![b.token(FALSE_KW, "false")]),
                    ],
                ),
                b.token(RBRACE, "}"),
            ],
        );
        rule(
            FUNCTION,
            vec![func, name, lparen, rparen, colon, ty, block],
        )
    };

    let tree = rule(SCRIPT, vec![f, g, h]);
    Fixture {
        source: b.finish(),
        tree,
    }
}

/// A sort-like script exercising nested blocks and keyword lookups:
///
/// ```text
/// func sort ( ) { var x = 10  var i = 0  while ( ) return }
/// if ( flag ) { var j = 1  var swap = 0  { var x = 5 } }
/// ```
///
/// The `while` statement's children are the `while` keyword, the parens,
/// and a body statement whose text is `return`. The trailing `if` hangs
/// directly off the script so the nested vardefs stay out of
/// `/script/function/...` selections.
pub fn bubblesort() -> Fixture {
    let mut b = TreeBuilder::new();

    let sort_fn = {
        let func = b.token(FUNC_KW, "func");
        let name = b.token(ID, "sort");
        let lparen = b.token(LPAREN, "(");
        let rparen = b.token(RPAREN, ")");
        let block = rule(
            BLOCK,
            vec![
                b.token(LBRACE, "{"),
                rule(
                    VARDEF,
                    vec![
                        b.token(VAR_KW, "var"),
                        b.token(ID, "x"),
                        b.token(EQ, "="),
                        rule(EXPR, vec![b.token(NUM, "10")]),
                    ],
                ),
                rule(
                    VARDEF,
                    vec![
                        b.token(VAR_KW, "var"),
                        b.token(ID, "i"),
                        b.token(EQ, "="),
                        rule(EXPR, vec![b.token(NUM, "0")]),
                    ],
                ),
                rule(
                    STATEMENT,
                    vec![
                        b.token(WHILE_KW, "while"),
                        b.token(LPAREN, "("),
                        b.token(RPAREN, ")"),
                        rule(STATEMENT, vec![b.token(RETURN_KW, "return")]),
                    ],
                ),
                b.token(RBRACE, "}"),
            ],
        );
        rule(FUNCTION, vec![func, name, lparen, rparen, block])
    };

    let if_stmt = {
        let if_kw = b.token(IF_KW, "if");
        let lparen = b.token(LPAREN, "(");
        let cond = rule(EXPR, vec![b.token(ID, "flag")]);
        let rparen = b.token(RPAREN, ")");
        let inner_block = rule(
            BLOCK,
            vec![
                b.token(LBRACE, "{"),
                rule(
                    VARDEF,
                    vec![
                        b.token(VAR_KW, "var"),
                        b.token(ID, "j"),
                        b.token(EQ, "="),
                        rule(EXPR, vec![b.token(NUM, "1")]),
                    ],
                ),
                rule(
                    VARDEF,
                    vec![
                        b.token(VAR_KW, "var"),
                        b.token(ID, "swap"),
                        b.token(EQ, "="),
                        rule(EXPR, vec![b.token(NUM, "0")]),
                    ],
                ),
                rule(
                    STATEMENT,
                    vec![rule(
                        BLOCK,
                        vec![
                            b.token(LBRACE, "{"),
                            rule(
                                VARDEF,
                                vec![
                                    b.token(VAR_KW, "var"),
                                    b.token(ID, "x"),
                                    b.token(EQ, "="),
                                    rule(EXPR, vec![b.token(NUM, "5")]),
                                ],
                            ),
                            b.token(RBRACE, "}"),
                        ],
                    )],
                ),
                b.token(RBRACE, "}"),
            ],
        );
        let body = rule(STATEMENT, vec![inner_block]);
        rule(STATEMENT, vec![if_kw, lparen, cond, rparen, body])
    };

    let tree = rule(SCRIPT, vec![sort_fn, if_stmt]);
    Fixture {
        source: b.finish(),
        tree,
    }
}
