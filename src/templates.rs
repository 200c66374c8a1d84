use handlebars::Handlebars;
use std::sync::Arc;

pub type Hbs = Arc<Handlebars<'static>>;

/// Name → file for every template rendered by name.
pub const TEMPLATES: &[(&str, &str)] = &[
    ("layouts/base", "templates/layouts/base.hbs"),
    ("pages/home", "templates/pages/home.hbs"),
    ("pages/not_found", "templates/pages/not_found.hbs"),
    ("partials/stock_form", "templates/partials/stock_form.hbs"),
    ("partials/holdings_list", "templates/partials/holdings_list.hbs"),
    ("partials/exchange_rate", "templates/partials/exchange_rate.hbs"),
];

/// Short names pulled in with `{{> name}}`; each reuses a file from [`TEMPLATES`].
pub const PARTIAL_ALIASES: &[(&str, &str)] = &[("stock_form", "partials/stock_form")];

fn file_of(name: &str) -> Option<&'static str> {
    TEMPLATES.iter().find(|(n, _)| *n == name).map(|(_, f)| *f)
}

pub fn build_handlebars() -> Hbs {
    let mut hb = Handlebars::new();

    for (name, file) in TEMPLATES {
        hb.register_template_file(name, file)
            .unwrap_or_else(|e| panic!("template {name}: {e}"));
    }

    for (alias, target) in PARTIAL_ALIASES {
        let file = file_of(target).unwrap_or_else(|| panic!("partial {alias}: no template {target}"));
        hb.register_template_file(alias, file)
            .unwrap_or_else(|e| panic!("partial {alias}: {e}"));
    }

    Arc::new(hb)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_template_and_alias_is_registered() {
        let hb = build_handlebars();

        for (name, _) in TEMPLATES.iter().chain(PARTIAL_ALIASES) {
            assert!(hb.has_template(name), "{name} missing");
        }
    }
}
