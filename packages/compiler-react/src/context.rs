use crate::attributes::AttributeTransformer;
use mockup_parser::NodeId;
use mockup_splitter::PropBinding;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

/// How the generated module pulls in its stylesheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StylesheetImport {
    /// `import styles from "./styles.module.css";` and `styles["x"]` classes
    Module { path: String },
    /// `import "./styles.css";`
    Global { path: String },
}

/// Options for React compilation
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    /// Emit TSX with a props interface
    pub typescript: bool,
    pub stylesheet: Option<StylesheetImport>,
    /// Classes that live in the CSS module and are referenced via `styles`
    pub module_classes: HashSet<String>,
}

impl CompileOptions {
    pub fn extension(&self) -> &'static str {
        if self.typescript {
            "tsx"
        } else {
            "jsx"
        }
    }
}

/// A nested component rendered as `<Name prop="value" />`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentReference {
    /// JSX tag
    pub name: String,
    /// File stem the component is imported from
    pub module: String,
    pub props: Vec<(String, String)>,
}

/// Compilation context for managing state during code generation
pub struct CompilerContext {
    buffer: Rc<RefCell<String>>,
    indent_level: Rc<RefCell<usize>>,
    pub options: CompileOptions,
    pub transformer: AttributeTransformer,
    /// Nodes replaced by a reference to another component
    pub references: HashMap<NodeId, ComponentReference>,
    /// Nodes whose text, attribute or event is bound to a prop
    pub bindings: HashMap<NodeId, Vec<(PropBinding, String)>>,
    /// Root element that receives `{children}`
    pub children_slot: Option<NodeId>,
}

impl CompilerContext {
    pub fn new(options: CompileOptions) -> Self {
        Self {
            buffer: Rc::new(RefCell::new(String::new())),
            indent_level: Rc::new(RefCell::new(0)),
            options,
            transformer: AttributeTransformer::new(),
            references: HashMap::new(),
            bindings: HashMap::new(),
            children_slot: None,
        }
    }

    pub fn add(&self, text: &str) {
        self.buffer.borrow_mut().push_str(text);
    }

    pub fn add_line(&self, text: &str) {
        self.add_indented(text);
        self.add("\n");
    }

    pub fn add_indented(&self, text: &str) {
        let indent = "  ".repeat(*self.indent_level.borrow());
        self.buffer.borrow_mut().push_str(&indent);
        self.buffer.borrow_mut().push_str(text);
    }

    pub fn indent(&self) {
        *self.indent_level.borrow_mut() += 1;
    }

    pub fn dedent(&self) {
        let mut level = self.indent_level.borrow_mut();
        if *level > 0 {
            *level -= 1;
        }
    }

    pub fn get_output(&self) -> String {
        self.buffer.borrow().clone()
    }

    pub fn is_module_class(&self, class: &str) -> bool {
        self.options.module_classes.contains(class)
    }

    /// Prop bound to `node` through `binding`, if any
    pub fn bound_prop(&self, node: NodeId, binding: &PropBinding) -> Option<&str> {
        self.bindings
            .get(&node)?
            .iter()
            .find(|(candidate, _)| candidate == binding)
            .map(|(_, prop)| prop.as_str())
    }
}
