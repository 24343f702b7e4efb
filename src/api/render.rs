//! HTML views
//!
//! Templates are compiled into the binary and rendered with minijinja.
//! Listing views receive the query that produced them so forms can echo it.

use minijinja::{context, Environment};
use serde::Serialize;
use crate::core::Result;
use crate::query::{ListQuery, Listed};
use crate::types::{Business, Category, HelpRequest, Priority};

/// An enumeration entry exposed to templates
#[derive(Debug, Clone, Serialize)]
pub struct Choice {
    /// Stored index of the value
    pub index: usize,
    /// Display name
    pub name: &'static str,
}

/// Compiled template set
pub struct Views {
    env: Environment<'static>,
}

impl Views {
    /// Compile the embedded templates
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_template("base.html", include_str!("../../templates/base.html"))?;
        env.add_template("business.html", include_str!("../../templates/business.html"))?;
        env.add_template("businesses.html", include_str!("../../templates/businesses.html"))?;
        env.add_template("helprequest.html", include_str!("../../templates/helprequest.html"))?;
        env.add_template("helprequests.html", include_str!("../../templates/helprequests.html"))?;
        Ok(Self { env })
    }

    /// Render a single business
    pub fn business(&self, id: &str, business: &Business) -> Result<String> {
        self.render("business.html", context! {
            id => id,
            business => business,
            categories => categories(),
        })
    }

    /// Render a business listing
    pub fn businesses(&self, businesses: &[Listed<Business>], query: &ListQuery) -> Result<String> {
        self.render("businesses.html", context! {
            businesses => businesses,
            q => &query.q,
            sort_by => &query.sort_by,
            categories => categories(),
        })
    }

    /// Render a single help request
    pub fn help_request(&self, id: &str, request: &HelpRequest) -> Result<String> {
        self.render("helprequest.html", context! {
            id => id,
            helprequest => request,
            priorities => priorities(),
        })
    }

    /// Render a help request listing
    pub fn help_requests(&self, requests: &[Listed<HelpRequest>], query: &ListQuery) -> Result<String> {
        self.render("helprequests.html", context! {
            helprequests => requests,
            q => &query.q,
            sort_by => &query.sort_by,
            priorities => priorities(),
        })
    }

    fn render(&self, name: &str, ctx: minijinja::Value) -> Result<String> {
        Ok(self.env.get_template(name)?.render(ctx)?)
    }
}

/// Categories, last declared first
fn categories() -> Vec<Choice> {
    Category::ALL
        .iter()
        .enumerate()
        .rev()
        .map(|(index, category)| Choice { index, name: category.as_str() })
        .collect()
}

fn priorities() -> Vec<Choice> {
    Priority::ALL
        .iter()
        .map(|priority| Choice { index: priority.index(), name: priority.as_str() })
        .collect()
}
