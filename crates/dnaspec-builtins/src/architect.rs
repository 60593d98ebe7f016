//! `architect`: architecture outline from system requirements

use dnaspec_router::SkillHandler;
use dnaspec_types::{Context, Result, SkillDescriptor};
use tracing::debug;

use crate::common::{bullets, context_str, mentions_any, require_request};
use crate::BUILTIN_VERSION;

/// Skill name
pub const NAME: &str = "architect";

const KEYWORDS: &[&str] = &[
    "架构", "系统设计", "architecture", "design", "structure", "系统架构", "架构设计",
    "设计系统", "architect", "blueprint", "设计", "创建系统", "系统蓝图",
];

const PRIORITY_KEYWORDS: &[&str] = &["系统架构", "架构设计", "系统设计"];

/// Architecture styles and the words that suggest them, checked in order
const STYLES: &[(&str, &[&str])] = &[
    ("microservices", &["微服务", "microservice", "分布式", "distributed", "独立服务"]),
    ("event-driven", &["事件驱动", "event-driven", "event driven", "异步", "asynchronous", "消息队列", "message queue"]),
    ("serverless", &["无服务器", "serverless", "lambda", "函数计算"]),
    ("layered", &["分层", "layered", "多层", "n-tier"]),
    ("monolithic", &["单体", "monolith", "集中式"]),
];

/// Business features and the components they usually need
const FEATURES: &[(&[&str], &[&str])] = &[
    (&["用户认证", "登录", "auth", "login"], &["Auth Service", "User Database", "Session Store"]),
    (&["商品", "product", "catalog"], &["Product Service", "Product Database", "Image Storage"]),
    (&["订单", "order"], &["Order Service", "Order Database", "Payment Integration"]),
    (&["支付", "payment"], &["Payment Service", "Payment Gateway", "Transaction Database"]),
    (&["用户管理", "user management"], &["User Service", "User Database", "Profile Storage"]),
    (&["电商", "e-commerce", "ecommerce", "shop"], &["Web Frontend", "API Gateway", "Database"]),
    (&["博客", "blog"], &["Web Application", "Content Database", "Comment System"]),
    (&["实时", "real-time", "realtime", "streaming"], &["Data Ingestion", "Processing Engine", "Output Stream"]),
    (&["api", "接口"], &["API Gateway", "Backend Services", "Data Layer"]),
];

const DEFAULT_COMPONENTS: &[&str] = &["Presentation Layer", "Business Logic", "Data Access", "Database"];

/// Descriptor of the `architect` skill
pub fn descriptor() -> SkillDescriptor {
    SkillDescriptor::new(
        NAME,
        "System architecture design: detects an architecture style and outlines components",
    )
    .with_keywords(KEYWORDS)
    .with_priority_keywords(PRIORITY_KEYWORDS)
    .with_version(BUILTIN_VERSION)
}

/// Architecture outline generator
///
/// Context key `architecture_style` forces a style instead of detecting one.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArchitectSkill;

impl ArchitectSkill {
    /// Detect the architecture style mentioned in the requirements
    pub fn detect_style(requirements: &str) -> Option<&'static str> {
        let text = requirements.to_lowercase();
        STYLES
            .iter()
            .find(|(_, keywords)| mentions_any(&text, keywords))
            .map(|(style, _)| *style)
    }

    /// Components suggested by the features mentioned in the requirements
    pub fn components(requirements: &str) -> Vec<&'static str> {
        let text = requirements.to_lowercase();
        let mut components: Vec<&'static str> = Vec::new();

        for (keywords, parts) in FEATURES {
            if mentions_any(&text, keywords) {
                for &part in *parts {
                    if !components.contains(&part) {
                        components.push(part);
                    }
                }
            }
        }

        if components.is_empty() {
            components.extend_from_slice(DEFAULT_COMPONENTS);
        }
        components
    }
}

fn recommendations(style: &str) -> &'static [&'static str] {
    match style {
        "microservices" => &[
            "Give every service its own datastore",
            "Put an API gateway in front of the services",
            "Add distributed tracing before the second service ships",
        ],
        "event-driven" => &[
            "Define event schemas and version them",
            "Make consumers idempotent",
            "Plan dead-letter handling for failed events",
        ],
        "serverless" => &[
            "Keep functions stateless and short-lived",
            "Measure cold-start latency on the critical path",
        ],
        "monolithic" => &[
            "Keep module boundaries explicit inside the codebase",
            "Scale horizontally behind a load balancer",
        ],
        _ => &[
            "Keep dependencies pointing from presentation toward data",
            "Expose each layer through a narrow interface",
        ],
    }
}

impl SkillHandler for ArchitectSkill {
    fn name(&self) -> &str {
        NAME
    }

    fn generate(&self, message: &str, context: &Context) -> Result<String> {
        let requirements = require_request(NAME, message)?;

        let (style, origin) = match context_str(context, "architecture_style") {
            Some(style) => (style.to_lowercase(), "requested"),
            None => match Self::detect_style(requirements) {
                Some(style) => (style.to_string(), "detected"),
                None => ("layered".to_string(), "default"),
            },
        };
        debug!("Architecture style '{}' ({})", style, origin);

        let components = Self::components(requirements);

        Ok(format!(
            "# Architecture Design\n\n\
             ## Requirements\n\n{requirements}\n\n\
             ## Architecture Style\n\n**{style}** ({origin})\n\n\
             ## Components\n\n{}\n\
             ## Recommendations\n\n{}",
            bullets(&components),
            bullets(recommendations(&style)),
        ))
    }
}
