//! Static domain knowledge base.
//!
//! A fixed catalogue of named technical domains with associated vocabulary
//! and guidance. Populated once at engine initialization, owned by the
//! engine instance, read-only thereafter. No process-global state.

use serde::{Deserialize, Serialize};

/// One named domain with its vocabulary and guidance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainKnowledge {
    pub name: String,
    pub concepts: Vec<String>,
    pub patterns: Vec<String>,
    pub technologies: Vec<String>,
    pub best_practices: Vec<String>,
    pub common_issues: Vec<String>,
}

/// The catalogue, in a fixed declaration order.
#[derive(Debug, Clone)]
pub struct DomainKnowledgeBase {
    domains: Vec<DomainKnowledge>,
}

impl DomainKnowledgeBase {
    /// Build the built-in catalogue.
    pub fn builtin() -> Self {
        Self {
            domains: vec![
                domain(
                    "web-development",
                    &["component", "routing", "state", "rendering", "middleware"],
                    &["mvc", "spa", "server-side-rendering"],
                    &["react", "express", "axios", "webpack", "vite"],
                    &[
                        "Keep components small and focused on one responsibility",
                        "Validate all input at the server boundary",
                        "Prefer composition over deep component hierarchies",
                    ],
                    &[
                        "State scattered across unrelated components",
                        "Business logic embedded in route handlers",
                    ],
                ),
                domain(
                    "security",
                    &["authentication", "authorization", "encryption", "hashing", "sanitization"],
                    &["least-privilege", "defense-in-depth", "input-validation"],
                    &["jwt", "oauth", "bcrypt", "tls", "helmet"],
                    &[
                        "Never store secrets in source control",
                        "Hash passwords with a slow, salted algorithm",
                        "Treat every external input as hostile until validated",
                    ],
                    &[
                        "Tokens with no expiry",
                        "String-concatenated SQL queries",
                    ],
                ),
                domain(
                    "data-persistence",
                    &["schema", "transaction", "migration", "indexing", "connection"],
                    &["repository", "unit-of-work", "active-record"],
                    &["postgres", "redis", "mongodb", "sqlite", "orm"],
                    &[
                        "Wrap multi-step writes in a transaction",
                        "Version every schema change as a migration",
                        "Index the columns your queries actually filter on",
                    ],
                    &[
                        "N+1 query patterns in list endpoints",
                        "Migrations applied out of order",
                    ],
                ),
                domain(
                    "testing",
                    &["unit", "integration", "coverage", "fixture", "mocking"],
                    &["arrange-act-assert", "test-double", "property-based"],
                    &["jest", "mocha", "pytest", "cypress", "vitest"],
                    &[
                        "Test behavior at the public boundary, not internals",
                        "Keep fixtures minimal and local to the test",
                        "Make flaky tests fail loudly, not retry silently",
                    ],
                    &[
                        "Assertions on implementation details",
                        "Shared mutable fixtures between tests",
                    ],
                ),
                domain(
                    "api-design",
                    &["endpoint", "versioning", "pagination", "serialization", "contract"],
                    &["rest", "rpc", "pagination-cursor"],
                    &["openapi", "graphql", "grpc", "swagger"],
                    &[
                        "Version breaking changes explicitly",
                        "Paginate every unbounded collection endpoint",
                        "Return machine-readable error bodies",
                    ],
                    &[
                        "Endpoints that return unbounded lists",
                        "Errors reported as HTTP 200 with an error field",
                    ],
                ),
                domain(
                    "performance",
                    &["latency", "throughput", "profiling", "memoization", "batching"],
                    &["lazy-loading", "connection-pooling", "caching"],
                    &["redis", "cdn", "lighthouse", "profiler"],
                    &[
                        "Measure before optimizing",
                        "Batch round-trips to remote services",
                        "Cache at the highest level that stays correct",
                    ],
                    &[
                        "Per-item remote calls inside loops",
                        "Caches with no invalidation story",
                    ],
                ),
                domain(
                    "devops",
                    &["deployment", "monitoring", "scaling", "containerization", "pipeline"],
                    &["blue-green", "canary", "infrastructure-as-code"],
                    &["docker", "kubernetes", "terraform", "prometheus"],
                    &[
                        "Make deployments reversible",
                        "Alert on symptoms users feel, not on every metric",
                        "Keep infrastructure definitions in code review",
                    ],
                    &[
                        "Configuration drift between environments",
                        "Manual steps hidden inside deploy runbooks",
                    ],
                ),
            ],
        }
    }

    /// Domains in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &DomainKnowledge> {
        self.domains.iter()
    }

    pub fn get(&self, name: &str) -> Option<&DomainKnowledge> {
        self.domains.iter().find(|d| d.name == name)
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

fn domain(
    name: &str,
    concepts: &[&str],
    patterns: &[&str],
    technologies: &[&str],
    best_practices: &[&str],
    common_issues: &[&str],
) -> DomainKnowledge {
    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }
    DomainKnowledge {
        name: name.to_string(),
        concepts: owned(concepts),
        patterns: owned(patterns),
        technologies: owned(technologies),
        best_practices: owned(best_practices),
        common_issues: owned(common_issues),
    }
}
