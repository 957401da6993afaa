//! Binds classified tokens to registered parameters.

use std::iter::Peekable;

use log::debug;

use crate::{
    diagnostics::{Diagnostics, ErrorCode},
    lexer::Token,
    registry::{DeclaredKind, Kind, OutputMap, Parameter, Registry, Value},
};

pub(crate) struct Dispatcher<'a> {
    registry: &'a Registry,
    out: &'a mut OutputMap,
    diagnostics: &'a mut Diagnostics,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        registry: &'a Registry,
        out: &'a mut OutputMap,
        diagnostics: &'a mut Diagnostics,
    ) -> Self {
        Self {
            registry,
            out,
            diagnostics,
        }
    }

    /// Consumes the whole token stream.
    pub fn run<'input, I>(&mut self, tokens: &mut Peekable<I>)
    where
        I: Iterator<Item = Token<'input>>,
    {
        while let Some(token) = tokens.next() {
            self.dispatch(token, tokens);
        }
    }

    fn dispatch<'input, I>(&mut self, token: Token<'input>, tokens: &mut Peekable<I>)
    where
        I: Iterator<Item = Token<'input>>,
    {
        let Some(alias) = token.candidate() else {
            self.diagnostics.raise(ErrorCode::Unmarked, token.raw);
            return;
        };
        let registry = self.registry;
        let Some(param) = registry.resolve(alias) else {
            self.diagnostics.raise(ErrorCode::UnknownParameter, token.raw);
            return;
        };

        // Reuse is reported, but the new binding still wins.
        if self.out.get(alias) != Some(&param.default) {
            self.diagnostics.raise(ErrorCode::AlreadyUsed, token.raw);
        }

        debug!("dispatching {:?} to {}", token.raw, param.alias_list());
        match &param.kind {
            DeclaredKind::Known(Kind::String) => self.bind_string(param, tokens),
            DeclaredKind::Known(Kind::Boolean) => self.out.bind_all(param, Value::Flag(true)),
            DeclaredKind::Known(Kind::Enumerated) => self.select_branch(param, alias),
            DeclaredKind::Unrecognized(tag) => {
                self.diagnostics.raise(ErrorCode::UnknownKind, tag.as_str())
            }
        }
    }

    /// Takes the following argument as the value, unless it is itself a
    /// flag. A flag is left in the stream to be dispatched on its own. With
    /// nothing left to take, the aliases keep their default.
    fn bind_string<'input, I>(&mut self, param: &Parameter, tokens: &mut Peekable<I>)
    where
        I: Iterator<Item = Token<'input>>,
    {
        if let Some(value) = tokens.next_if(|next| !next.is_flag_shaped()) {
            self.out.bind_all(param, Value::from(value.raw));
        } else if let Some(flag) = tokens.peek() {
            self.diagnostics.raise(ErrorCode::InvalidString, flag.raw);
        }
    }

    /// Clears every branch of the group, then switches on the one selected.
    fn select_branch(&mut self, param: &Parameter, alias: &str) {
        self.out.bind_all(param, Value::Flag(false));
        self.out.bind(alias, Value::Flag(true));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{diagnostics::ErrorCode::*, lexer::Tokenizer, registry::Declaration};
    use pretty_assertions::assert_eq;

    struct Fixture {
        registry: Registry,
        out: OutputMap,
        diagnostics: Diagnostics,
    }

    impl Fixture {
        fn new() -> Self {
            let mut fixture = Self {
                registry: Registry::new(),
                out: OutputMap::new(),
                diagnostics: Diagnostics::new(),
            };
            fixture.add(Kind::String, "", &["r", "req-string"]);
            fixture.add(Kind::Boolean, false, &["q", "quiet"]);
            fixture.add(Kind::Enumerated, false, &["build", "deploy", "test"]);
            fixture
        }

        fn add(&mut self, kind: Kind, default: impl Into<Value>, aliases: &[&str]) {
            let decl = Declaration::new()
                .mandatory(false)
                .kind(kind)
                .description("")
                .default_value(default)
                .aliases(aliases.iter().copied());
            self.add_decl(decl);
        }

        fn add_decl(&mut self, decl: Declaration) {
            let index = self.registry.register(decl).unwrap();
            self.out.seed(self.registry.get(index).unwrap());
        }

        fn run(&mut self, args: &[&str]) -> Vec<ErrorCode> {
            let argv: Vec<String> = std::iter::once("prog")
                .chain(args.iter().copied())
                .map(String::from)
                .collect();
            let mut tokens = Tokenizer::new(&argv).peekable();
            Dispatcher::new(&self.registry, &mut self.out, &mut self.diagnostics)
                .run(&mut tokens);
            self.diagnostics.codes()
        }

        fn contexts(&self) -> Vec<&str> {
            self.diagnostics
                .iter()
                .map(|record| record.context.as_str())
                .collect()
        }
    }

    #[test]
    fn string_binds_every_alias() {
        let mut fixture = Fixture::new();
        assert_eq!(fixture.run(&["--req-string", "payload"]), vec![]);
        assert_eq!(fixture.out.text("r"), Some("payload"));
        assert_eq!(fixture.out.text("req-string"), Some("payload"));
    }

    #[test]
    fn boolean_sets_every_alias() {
        let mut fixture = Fixture::new();
        assert_eq!(fixture.run(&["-q"]), vec![]);
        assert_eq!(fixture.out.flag("q"), Some(true));
        assert_eq!(fixture.out.flag("quiet"), Some(true));
    }

    #[test]
    fn enumerated_branches_are_exclusive() {
        let orders: [&[&str]; 3] = [&["--build"], &["--test"], &["--deploy"]];
        for order in orders {
            let mut fixture = Fixture::new();
            fixture.run(order);
            let selected = &order[0][2..];
            for branch in ["build", "deploy", "test"] {
                assert_eq!(fixture.out.flag(branch), Some(branch == selected));
            }
        }
    }

    macro_rules! make_selection_case {
        ($name: ident, [$( $flag: expr ),+ $(,)?], $selected: expr) => {
            #[test]
            fn $name() {
                let mut fixture = Fixture::new();
                assert_eq!(fixture.run(&[$($flag),+]), vec![]);
                for branch in ["build", "deploy", "test"] {
                    assert_eq!(fixture.out.flag(branch), Some(branch == $selected));
                }
            }
        };
    }

    make_selection_case!(build_then_test, ["--build", "--test"], "test");
    make_selection_case!(test_then_build, ["--test", "--build"], "build");
    make_selection_case!(deploy_then_build, ["--deploy", "--build"], "build");
    make_selection_case!(build_then_deploy, ["--build", "--deploy"], "deploy");
    make_selection_case!(test_then_deploy, ["--test", "--deploy"], "deploy");
    make_selection_case!(deploy_then_test, ["--deploy", "--test"], "test");
    make_selection_case!(deploy_build_test, ["--deploy", "--build", "--test"], "test");
    make_selection_case!(test_deploy_build, ["--test", "--deploy", "--build"], "build");
    make_selection_case!(build_test_deploy, ["--build", "--test", "--deploy"], "deploy");

    #[test]
    fn reuse_is_reported_and_last_write_wins() {
        let mut fixture = Fixture::new();
        assert_eq!(fixture.run(&["-r", "first", "--req-string", "second"]), vec![AlreadyUsed]);
        assert_eq!(fixture.contexts(), vec!["--req-string"]);
        assert_eq!(fixture.out.text("r"), Some("second"));
    }

    #[test]
    fn repeated_branch_is_reused() {
        let mut fixture = Fixture::new();
        assert_eq!(fixture.run(&["--deploy", "--deploy"]), vec![AlreadyUsed]);
        assert_eq!(fixture.out.flag("deploy"), Some(true));
    }

    #[test]
    fn unknown_flags_do_not_stop_the_scan() {
        let mut fixture = Fixture::new();
        assert_eq!(
            fixture.run(&["--nope", "-xy", "-q"]),
            vec![UnknownParameter, UnknownParameter]
        );
        assert_eq!(fixture.contexts(), vec!["--nope", "-xy"]);
        assert_eq!(fixture.out.flag("q"), Some(true));
    }

    #[test]
    fn single_character_alias_needs_one_dash() {
        let mut fixture = Fixture::new();
        assert_eq!(fixture.run(&["--q"]), vec![UnknownParameter]);
        assert_eq!(fixture.out.flag("q"), Some(false));
    }

    #[test]
    fn unmarked_values_are_reported() {
        let mut fixture = Fixture::new();
        assert_eq!(fixture.run(&["stray", "-q", "other"]), vec![Unmarked, Unmarked]);
        assert_eq!(fixture.contexts(), vec!["stray", "other"]);
    }

    #[test]
    fn string_followed_by_flag_leaves_the_flag() {
        let mut fixture = Fixture::new();
        assert_eq!(fixture.run(&["-r", "-x"]), vec![InvalidString, UnknownParameter]);
        assert_eq!(fixture.contexts(), vec!["-x", "-x"]);
        assert_eq!(fixture.out.text("r"), Some(""));
    }

    #[test]
    fn string_followed_by_known_flag_dispatches_it() {
        let mut fixture = Fixture::new();
        assert_eq!(fixture.run(&["-r", "--quiet"]), vec![InvalidString]);
        assert_eq!(fixture.out.flag("q"), Some(true));
    }

    #[test]
    fn string_at_end_of_input_keeps_its_default() {
        let mut fixture = Fixture::new();
        assert_eq!(fixture.run(&["-q", "-r"]), vec![]);
        assert_eq!(fixture.out.text("r"), Some(""));
        assert_eq!(fixture.out.text("req-string"), Some(""));
    }

    #[test]
    fn unrecognized_kind_is_reported_on_use() {
        let mut fixture = Fixture::new();
        fixture.add_decl(
            Declaration::new()
                .mandatory(false)
                .kind_tag("float")
                .description("")
                .default_value("")
                .aliases(["ratio"]),
        );
        assert_eq!(fixture.run(&["--ratio", "0.5"]), vec![UnknownKind, Unmarked]);
        assert_eq!(fixture.contexts(), vec!["float", "0.5"]);
    }
}
