//! Render a few snippets with variables from the editor and from the process environment.
//!
//! Run with `cargo run --example render-snippets -- [SNIPPET...]` to render your own snippets.
use std::collections::HashMap;
use std::sync::LazyLock;

use lsp_snippet::{fallback, Node, Snippet};

static EDITOR_VARIABLES: &[(&str, &str)] = &[
	("TM_FILENAME", "snippet_demo.rs"),
	("TM_FILENAME_BASE", "snippet_demo"),
	("TM_LINE_NUMBER", "42"),
	("TM_SELECTED_TEXT", ""),
];

static SNIPPETS: LazyLock<Vec<Snippet>> = LazyLock::new(|| {
	[
		"fn ${1:name}(${2:arg: ${3:u32}}) -> ${4:()} {\n\t$0\n}",
		"${1|debug,info,warn,error|}!(\"${2:message}\");",
		"struct ${TM_FILENAME_BASE/(.*)/${1:/pascalcase}/};",
		"// ${TM_SELECTED_TEXT:nothing selected} at line $TM_LINE_NUMBER",
		"// written by ${USER:someone} in ${HOME/.*\\/(\\w+)$/~$1/}",
		"${1:unterminated",
	]
	.iter()
	.map(|source| Snippet::parse(source))
	.collect()
});

fn describe(nodes: &[Node], indent: usize) {
	for node in nodes {
		println!("{:indent$}{} {:?}", "", node.kind(), node.to_string(), indent = indent);
		match node {
			Node::Placeholder(placeholder) => describe(&placeholder.children, indent + 2),
			Node::Variable(variable) => {
				if let Some(children) = variable.default() {
					describe(children, indent + 2);
				}
			},
			_ => (),
		}
	}
}

pub fn main() {
	let arguments: Vec<Snippet> = std::env::args().skip(1).map(|source| Snippet::parse(&source)).collect();
	let snippets = if arguments.is_empty() { &SNIPPETS[..] } else { &arguments[..] };

	// Editor variables take precedence, anything else comes from the environment.
	let editor: HashMap<String, String> = EDITOR_VARIABLES
		.iter()
		.map(|&(name, value)| (name.to_owned(), value.to_owned()))
		.collect();
	let environment: HashMap<String, String> = std::env::vars().collect();
	let variables = fallback(editor, environment);

	for snippet in snippets {
		println!("Snippet:   {}", snippet);
		describe(snippet.children(), 2);
		println!("Default:   {:?}", snippet.render());
		println!("Resolved:  {:?}", snippet.render_with(&variables));
		println!();
	}
}
