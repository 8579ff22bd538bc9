// Copyright (c) 2025 Zensical and contributors

// SPDX-License-Identifier: MIT
// Third-party contributions licensed under DCO

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to
// deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NON-INFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
// FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS
// IN THE SOFTWARE.

// ----------------------------------------------------------------------------

//! Router.

use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;
use zensical_template::{Mode, Template, Variables};

use super::error::Result;

mod config;
mod route;

pub use config::{Config, Routing};
pub use route::Route;

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Resolved route.
#[derive(Debug)]
pub struct Resolved<'a, T> {
    /// Selected route.
    pub route: &'a Route<T>,
    /// Matched part of the remaining part.
    pub matched: String,
    /// Remaining part after the match.
    pub remaining: String,
    /// Variables extracted from the matched part.
    pub variables: Variables,
}

// ----------------------------------------------------------------------------

/// Router.
///
/// Routers hold a list of routes, and select one of them for the remaining
/// part of a path according to the configured routing mode. Only routes that
/// match and whose score reaches the required score are considered. If no
/// route is selected, the default route is used, if any.
///
/// # Examples
///
/// ```
/// use zensical_route::{Config, Router, Routing};
///
/// // Create router and attach routes
/// let mut router = Router::with_config(
///     Config::default().routing(Routing::Best),
/// ).unwrap();
/// router.attach("/users", "users");
/// router.attach("/users/{id}", "user");
///
/// // Resolve route for path
/// let resolved = router.resolve("/users/42/orders").unwrap();
/// assert_eq!(resolved.route.target(), &"user");
/// assert_eq!(resolved.matched, "/users/42");
/// assert_eq!(resolved.remaining, "/orders");
/// assert_eq!(resolved.variables.get("id"), Some("42"));
/// ```
#[derive(Debug)]
pub struct Router<T> {
    /// Router configuration.
    config: Config,
    /// Routes in order of attachment.
    routes: Vec<Route<T>>,
    /// Default route.
    default: Option<Route<T>>,
    /// Index after the last route selected in round robin mode.
    cursor: AtomicUsize,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<T> Router<T> {
    /// Creates a router with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            routes: Vec::new(),
            default: None,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Creates a router with the given configuration.
    ///
    /// # Errors
    ///
    /// This method returns [`Error::Score`](crate::Error::Score), if the
    /// required score of the configuration is not within `[0, 1]`.
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, ..Self::new() })
    }

    /// Attaches a route matching prefixes of the remaining part.
    pub fn attach<P>(&mut self, pattern: P, target: T) -> &mut Route<T>
    where
        P: Into<String>,
    {
        self.attach_route(Route::new(pattern, target))
    }

    /// Attaches a route with the given template.
    pub fn attach_template(
        &mut self, template: Template, target: T,
    ) -> &mut Route<T> {
        self.attach_route(Route::with_template(template, target))
    }

    /// Attaches the default route, which matches any remaining part.
    ///
    /// The default route scores exactly the required score for non-empty
    /// remaining parts, so it's selected whenever no other route is.
    pub fn attach_default(&mut self, target: T) -> &mut Route<T> {
        let template = Template::builder("").mode(Mode::StartsWith).build();
        self.default.insert(Route::with_template(template, target))
    }

    /// Resolves the route for the remaining part of a path.
    pub fn resolve(&self, remaining: &str) -> Option<Resolved<'_, T>> {
        let route = self.select(remaining)?;
        let parsed = route.template().parse(remaining)?;

        // Split remaining part at the end of the match
        let (matched, rest) = remaining.split_at(parsed.length);
        debug!(
            pattern = %route.template(),
            matched,
            remaining = rest,
            "route resolved"
        );
        Some(Resolved {
            route,
            matched: matched.to_string(),
            remaining: rest.to_string(),
            variables: parsed.variables,
        })
    }

    /// Selects the route for the remaining part of a path.
    pub fn select(&self, remaining: &str) -> Option<&Route<T>> {
        let required = self.config.required_score;
        let accepts = |route: &Route<T>| {
            route
                .rate(remaining, required)
                .is_some_and(|score| score >= required)
        };

        // Select route according to routing mode
        let len = self.routes.len();
        let selected = match self.config.routing {
            Routing::Best => self.best(remaining),
            Routing::First => self.routes.iter().find(|&route| accepts(route)),
            Routing::Last => {
                self.routes.iter().rev().find(|&route| accepts(route))
            }
            Routing::Next => {
                let mut selected = None;
                let updated = self.cursor.fetch_update(
                    Ordering::Relaxed,
                    Ordering::Relaxed,
                    |start| {
                        selected = self.rotate(start, accepts);
                        selected.map(|index| index + 1)
                    },
                );
                updated.ok().and(selected).map(|index| &self.routes[index])
            }
            Routing::Random if len > 0 => {
                let start = fastrand::usize(..len);
                self.rotate(start, accepts).map(|index| &self.routes[index])
            }
            Routing::Random => None,
        };

        // Fall back to default route, if nothing else was selected
        let default = self.default.as_ref();
        selected.or_else(|| default.filter(|&route| accepts(route)))
    }

    /// Returns the route with the highest score, the first one winning ties.
    fn best(&self, remaining: &str) -> Option<&Route<T>> {
        let required = self.config.required_score;
        let mut best: Option<(f32, &Route<T>)> = None;
        for route in &self.routes {
            let Some(score) = route.rate(remaining, required) else {
                continue;
            };
            if score >= required
                && best.is_none_or(|(current, _)| score > current)
            {
                best = Some((score, route));
            }
        }
        best.map(|(_, route)| route)
    }

    /// Returns the index of the first accepted route, starting at the given
    /// index and wrapping around.
    fn rotate<F>(&self, start: usize, accepts: F) -> Option<usize>
    where
        F: Fn(&Route<T>) -> bool,
    {
        let len = self.routes.len();
        (0..len)
            .map(|offset| (start + offset) % len)
            .find(|&index| accepts(&self.routes[index]))
    }

    /// Attaches the given route.
    fn attach_route(&mut self, route: Route<T>) -> &mut Route<T> {
        self.routes.push(route);
        let index = self.routes.len() - 1;
        &mut self.routes[index]
    }
}

#[allow(clippy::must_use_candidate)]
impl<T> Router<T> {
    /// Returns the router configuration.
    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the routes in order of attachment.
    #[inline]
    pub fn routes(&self) -> &[Route<T>] {
        &self.routes
    }

    /// Returns the default route, if any.
    #[inline]
    pub fn default_route(&self) -> Option<&Route<T>> {
        self.default.as_ref()
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl<T> Default for Router<T> {
    /// Creates a router with the default configuration.
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::thread;
    use zensical_template::{Kind, Variable};

    use super::*;

    fn create_router(routing: Routing, patterns: &[&str]) -> Router<usize> {
        let config = Config::default().routing(routing);
        let mut router = Router::with_config(config).unwrap();
        for (index, pattern) in patterns.iter().enumerate() {
            router.attach(*pattern, index);
        }
        router
    }

    fn select(router: &Router<usize>, remaining: &str) -> Option<usize> {
        router.select(remaining).map(|route| *route.target())
    }

    #[test]
    fn test_select() {
        let patterns = ["/a", "/a/{x}", "/b", "/a/b"];
        let test_cases = vec![
            (Routing::Best, "/a/b", Some(1)),
            (Routing::Best, "/a/bc/d", Some(1)),
            (Routing::Best, "/a", Some(0)),
            (Routing::First, "/a/b", Some(0)),
            (Routing::Last, "/a/b", Some(3)),
            (Routing::Last, "/b", Some(2)),
            (Routing::First, "/c", None),
            (Routing::Last, "/c", None),
        ];
        for (routing, remaining, expected) in test_cases {
            let router = create_router(routing, &patterns);
            assert_eq!(
                select(&router, remaining),
                expected,
                "Failed for {routing}: {remaining}"
            );
        }
    }

    #[test]
    fn test_select_required_score() {
        let config = Config::default().required_score(0.0);
        let mut router = Router::with_config(config).unwrap();
        router.attach("/a", 0);

        // Routes that don't match are never selected
        assert_eq!(select(&router, "/b"), None);
        assert_eq!(select(&router, "/a/b"), Some(0));
    }

    #[test]
    fn test_select_next() {
        let router = create_router(Routing::Next, &["/a", "/b", "/a/{x}"]);
        let selected: Vec<_> =
            (0..4).map(|_| select(&router, "/a/b").unwrap()).collect();
        assert_eq!(selected, [0, 2, 0, 2]);
        assert_eq!(select(&router, "/b"), Some(1));
        assert_eq!(select(&router, "/c"), None);
    }

    #[test]
    fn test_select_next_shared_between_threads() {
        let router = create_router(Routing::Next, &["/a", "/{x}"]);
        let selected: Vec<usize> = thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    scope.spawn(|| {
                        (0..25)
                            .map(|_| select(&router, "/a").unwrap())
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            handles
                .into_iter()
                .flat_map(|handle| handle.join().unwrap())
                .collect()
        });

        // Each selection advances the cursor exactly once
        let first = selected.iter().filter(|&&index| index == 0).count();
        assert_eq!(first, 50);
        assert_eq!(selected.len() - first, 50);
    }

    #[test]
    fn test_select_random() {
        let router = create_router(Routing::Random, &["/a", "/b", "/a/{x}"]);
        for _ in 0..20 {
            let selected = select(&router, "/a/b").unwrap();
            assert!(selected == 0 || selected == 2);
        }
        assert_eq!(select(&router, "/b"), Some(1));
        assert_eq!(select(&router, "/c"), None);

        // Random selection on an empty router never panics
        let router = create_router(Routing::Random, &[]);
        assert_eq!(select(&router, "/a"), None);
    }

    #[test]
    fn test_select_default() {
        let mut router = create_router(Routing::First, &["/a"]);
        router.attach_default(9);
        assert_eq!(select(&router, "/a"), Some(0));
        assert_eq!(select(&router, "/c"), Some(9));
        assert_eq!(select(&router, ""), Some(9));
    }

    #[test]
    fn test_resolve() {
        let mut router = create_router(Routing::Best, &[]);
        router.attach_template(
            Template::builder("/orders/{id}")
                .mode(Mode::StartsWith)
                .variable("id", Variable::new(Kind::Digit))
                .build(),
            0,
        );
        router.attach("/orders/{id}/items", 1);

        // Resolve most specific route
        let resolved = router.resolve("/orders/7/items/3").unwrap();
        assert_eq!(*resolved.route.target(), 1);
        assert_eq!(resolved.matched, "/orders/7/items");
        assert_eq!(resolved.remaining, "/3");
        assert_eq!(resolved.variables.get("id"), Some("7"));

        // Digit variable doesn't match
        assert!(router.resolve("/orders/x").is_none());
        assert!(router.resolve("/orders/x/items").is_some());
    }

    #[test]
    fn test_with_config() {
        let config = Config::default().required_score(2.0);
        assert!(Router::<()>::with_config(config).is_err());
    }
}
