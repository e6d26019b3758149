use crate::options::CssOptions;
use crate::strategy::{
    apply_class, element_declarations, styled_elements, ClassRegistry, CssConversionResult,
    CssStats, CssStrategy, DocumentConversion,
};
use crate::stylesheet::{merge_identical_rules, Stylesheet};
use mockup_common::GeneratedFile;
use mockup_parser::{serialize, ParsedDocument};

/// Plain external stylesheet strategy
#[derive(Debug, Default)]
pub struct ExternalStrategy {
    options: CssOptions,
    stylesheet: Stylesheet,
    stats: CssStats,
}

impl ExternalStrategy {
    pub fn new(options: CssOptions) -> Self {
        Self {
            options,
            stylesheet: Stylesheet::new(),
            stats: CssStats::default(),
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.css", self.options.file_name)
    }

    pub fn stylesheet(&self) -> &Stylesheet {
        &self.stylesheet
    }

    fn link_tag(&self) -> String {
        format!(r#"<link rel="stylesheet" href="{}">"#, self.file_name())
    }
}

impl CssStrategy for ExternalStrategy {
    fn strategy_name(&self) -> &'static str {
        "external"
    }

    fn options(&self) -> &CssOptions {
        &self.options
    }

    fn convert_document(&mut self, doc: &ParsedDocument) -> DocumentConversion {
        self.stats = CssStats::default();

        let mut document = doc.clone();
        let mut registry = ClassRegistry::new(&self.options.class_prefix, false);

        for (ordinal, id) in styled_elements(doc).into_iter().enumerate() {
            let declarations = element_declarations(&doc.node(id).attributes);
            self.stats.elements_processed += 1;
            self.stats.declarations_processed += declarations.len();
            let class = registry.class_for(&declarations, ordinal);
            apply_class(&mut document, id, &class, self.options.preserve_inline);
        }

        let rules = std::mem::take(&mut registry.rules);
        let before = rules.len();
        let rules = if self.options.optimize {
            merge_identical_rules(rules)
        } else {
            rules
        };
        self.stats.rules_merged = before - rules.len();
        self.stats.classes_generated = registry.classes_generated();
        self.stylesheet = Stylesheet { rules };

        tracing::debug!(
            rules = self.stylesheet.rules.len(),
            merged = self.stats.rules_merged,
            "external conversion finished"
        );

        let mut html = serialize(&document);
        if self.options.inject_link {
            html = format!("{}\n{}", self.link_tag(), html);
        }

        let css = self.generate_css();
        let result = CssConversionResult {
            html,
            generated_files: vec![GeneratedFile::stylesheet(self.file_name(), css.clone())],
            css,
            class_name_map: registry.class_name_map,
            warnings: Vec::new(),
        };
        DocumentConversion { document, result }
    }

    fn generate_css(&self) -> String {
        self.stylesheet.to_css()
    }

    fn stats(&self) -> CssStats {
        self.stats
    }
}
