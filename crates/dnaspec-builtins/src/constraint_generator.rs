//! `constraint-generator`: domain-aware constraint list

use dnaspec_router::SkillHandler;
use dnaspec_types::{Context, Result, SkillDescriptor};
use tracing::debug;

use crate::common::{context_str, mentions_any, require_request};
use crate::BUILTIN_VERSION;

/// Skill name
pub const NAME: &str = "constraint-generator";

const KEYWORDS: &[&str] = &[
    "约束", "生成约束", "constraint", "generate", "specification", "规范", "规则",
    "constraint generation", "rules", "生成", "创建约束", "制定规范",
];

const PRIORITY_KEYWORDS: &[&str] = &["生成约束", "创建约束", "constraint generation"];

/// A family of constraints and the words that call for it
struct Category {
    name: &'static str,
    title: &'static str,
    triggers: &'static [&'static str],
    rules: &'static [&'static str],
}

const CATEGORIES: &[Category] = &[
    Category {
        name: "security",
        title: "Security",
        triggers: &["安全", "认证", "加密", "权限", "登录", "密码", "security", "auth", "encrypt", "login", "password"],
        rules: &[
            "Every operation requires an authenticated caller",
            "Sensitive data is encrypted in transit and at rest",
            "Access follows least privilege",
            "Security-relevant actions are written to an audit log",
        ],
    },
    Category {
        name: "performance",
        title: "Performance",
        triggers: &["性能", "响应", "并发", "延迟", "吞吐", "performance", "latency", "throughput", "concurren"],
        rules: &[
            "p99 response time stays under 2 seconds",
            "The system sustains at least 1000 concurrent users",
            "CPU stays under 80% and memory under 85% at peak load",
        ],
    },
    Category {
        name: "data",
        title: "Data",
        triggers: &["数据", "数据库", "存储", "备份", "data", "database", "storage", "backup"],
        rules: &[
            "Writes that span records are transactional",
            "Backups run daily and restores are rehearsed",
            "Personal data has a documented retention period",
        ],
    },
    Category {
        name: "api",
        title: "API",
        triggers: &["接口", "api", "endpoint", "rest", "grpc"],
        rules: &[
            "Endpoints are versioned and breaking changes get a new version",
            "Errors use one documented response shape",
            "Every request and response is validated against a schema",
        ],
    },
    Category {
        name: "finance",
        title: "Finance",
        triggers: &["金融", "支付", "银行", "交易", "账户", "finance", "payment", "bank", "transaction"],
        rules: &[
            "Monetary amounts use fixed-point decimals, never floats",
            "Every transaction is idempotent and traceable end to end",
            "Ledger entries are append-only",
            "Processing complies with the applicable payment regulations",
        ],
    },
];

const GENERAL_RULES: &[&str] = &[
    "Behavior matches the documented business rules",
    "Inputs are validated at system boundaries",
    "Changes ship with automated tests",
];

/// Descriptor of the `constraint-generator` skill
pub fn descriptor() -> SkillDescriptor {
    SkillDescriptor::new(
        NAME,
        "Generates system constraints and specifications from requirements",
    )
    .with_keywords(KEYWORDS)
    .with_priority_keywords(PRIORITY_KEYWORDS)
    .with_version(BUILTIN_VERSION)
}

/// Constraint list generator
///
/// Context key `domain` adds the matching category even when the request
/// does not mention it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstraintGeneratorSkill;

impl ConstraintGeneratorSkill {
    /// Names of the categories that apply to the request
    pub fn categories(request: &str, domain: Option<&str>) -> Vec<&'static str> {
        let text = request.to_lowercase();
        let domain = domain.map(str::to_lowercase);

        CATEGORIES
            .iter()
            .filter(|category| {
                mentions_any(&text, category.triggers)
                    || domain.as_deref().is_some_and(|d| {
                        d == category.name || mentions_any(d, category.triggers)
                    })
            })
            .map(|category| category.name)
            .collect()
    }

    /// Severity label for the request
    pub fn priority(request: &str) -> &'static str {
        let text = request.to_lowercase();
        if mentions_any(&text, &["关键", "核心", "必须", "合规", "critical", "must", "compliance"]) {
            "critical"
        } else if mentions_any(&text, &["重要", "优先", "important", "priority"]) {
            "high"
        } else {
            "medium"
        }
    }
}

impl SkillHandler for ConstraintGeneratorSkill {
    fn name(&self) -> &str {
        NAME
    }

    fn generate(&self, message: &str, context: &Context) -> Result<String> {
        let request = require_request(NAME, message)?;
        let names = Self::categories(request, context_str(context, "domain"));
        let priority = Self::priority(request);
        debug!("Constraint categories {:?} at {} priority", names, priority);

        let mut sections = String::new();
        let mut counter = 0;
        let mut push_section = |title: &str, rules: &[&str]| {
            sections.push_str(&format!("## {title}\n\n"));
            for rule in rules {
                counter += 1;
                sections.push_str(&format!("- **C{counter:02}** [{priority}] {rule}\n"));
            }
            sections.push('\n');
        };

        for category in CATEGORIES.iter().filter(|c| names.contains(&c.name)) {
            push_section(category.title, category.rules);
        }
        push_section("General", GENERAL_RULES);

        Ok(format!(
            "# Constraints\n\n\
             **Requirements**: {request}\n\n\
             {sections}\
             Constraints marked [critical] block release when violated.\n"
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_categories_from_request() {
        assert_eq!(
            ConstraintGeneratorSkill::categories("用户登录需要加密，接口响应要快", None),
            vec!["security", "performance", "api"]
        );
        assert!(ConstraintGeneratorSkill::categories("生成约束", None).is_empty());
    }

    #[test]
    fn test_domain_adds_category() {
        assert_eq!(
            ConstraintGeneratorSkill::categories("生成约束", Some("Finance")),
            vec!["finance"]
        );
        assert_eq!(
            ConstraintGeneratorSkill::categories("生成约束", Some("银行")),
            vec!["finance"]
        );
    }

    #[test]
    fn test_priority() {
        assert_eq!(ConstraintGeneratorSkill::priority("必须符合合规要求"), "critical");
        assert_eq!(ConstraintGeneratorSkill::priority("important feature"), "high");
        assert_eq!(ConstraintGeneratorSkill::priority("生成约束"), "medium");
    }

    #[test]
    fn test_generate_numbers_rules_across_sections() {
        let mut context = Context::new();
        context.insert("domain".to_string(), json!("finance"));

        let output = ConstraintGeneratorSkill
            .generate("为支付系统生成约束", &context)
            .unwrap();

        assert!(output.starts_with("# Constraints"));
        assert!(output.contains("## Finance\n\n- **C01** [medium] Monetary amounts"));
        assert!(output.contains("## General\n\n- **C05** [medium]"));
        assert!(!output.contains("## Security"));
    }

    #[test]
    fn test_empty_request_is_rejected() {
        assert!(ConstraintGeneratorSkill.generate("", &Context::new()).is_err());
    }
}
