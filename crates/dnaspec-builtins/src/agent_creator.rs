//! `agent-creator`: agent definition with role, capabilities and personality

use dnaspec_router::SkillHandler;
use dnaspec_types::{Context, Result, SkillDescriptor};
use tracing::debug;

use crate::common::{bullets, context_list, context_str, mentions_any, require_request};
use crate::BUILTIN_VERSION;

/// Skill name
pub const NAME: &str = "agent-creator";

const KEYWORDS: &[&str] = &[
    "智能体", "agent", "create agent", "设计智能体", "创建智能体", "智能体角色",
    "agent creator", "智能体设计", "create", "role", "创建", "生成智能体", "设计agent",
];

const PRIORITY_KEYWORDS: &[&str] = &["创建智能体", "生成智能体", "create agent"];

const DOMAINS: &[(&str, &[&str])] = &[
    ("finance", &["金融", "银行", "支付", "交易", "finance", "banking", "payment"]),
    ("healthcare", &["医疗", "医院", "患者", "诊断", "health", "medical", "patient"]),
    ("education", &["教育", "学生", "课程", "考试", "education", "student", "course"]),
    ("e-commerce", &["电商", "商品", "订单", "购物", "e-commerce", "shop", "order"]),
    ("software", &["代码", "编程", "开发", "软件", "code", "programming", "software"]),
];

const CAPABILITIES: &[(&str, &[&str])] = &[
    ("programming", &["编程", "代码", "开发", "code", "program", "develop"]),
    ("data_analysis", &["数据", "分析", "报表", "data", "analy", "report"]),
    ("documentation", &["文档", "写作", "document", "writing", "write"]),
    ("research", &["研究", "调研", "research", "investigate"]),
    ("planning", &["规划", "计划", "项目管理", "plan", "schedule"]),
    ("security", &["安全", "漏洞", "security", "vulnerab"]),
    ("customer_support", &["客服", "支持", "support", "customer"]),
];

/// Personality key, display name and traits
const PERSONALITIES: &[(&str, &str, &str)] = &[
    ("professional_precise", "Professional and precise", "formal, accurate, detail oriented"),
    ("friendly_supportive", "Friendly and supportive", "encouraging, patient, helpful"),
    ("analytical_critical", "Analytical and critical", "systematic, questioning, thorough"),
    ("creative_innovative", "Creative and innovative", "imaginative, open, solution oriented"),
    ("direct_efficient", "Direct and efficient", "concise, action oriented, practical"),
];

/// Descriptor of the `agent-creator` skill
pub fn descriptor() -> SkillDescriptor {
    SkillDescriptor::new(
        NAME,
        "Creates specialized AI agents with specific roles, capabilities, and instructions",
    )
    .with_keywords(KEYWORDS)
    .with_priority_keywords(PRIORITY_KEYWORDS)
    .with_version(BUILTIN_VERSION)
}

/// Agent definition generator
///
/// Context keys: `domain`, `capabilities` (array or comma-separated) and
/// `personality` (one of the personality keys) override inference.
#[derive(Debug, Clone, Copy, Default)]
pub struct AgentCreatorSkill;

impl AgentCreatorSkill {
    /// Domain inferred from the request, `general` when nothing matches
    pub fn infer_domain(request: &str) -> &'static str {
        let text = request.to_lowercase();
        DOMAINS
            .iter()
            .find(|(_, keywords)| mentions_any(&text, keywords))
            .map_or("general", |(domain, _)| *domain)
    }

    /// Capabilities inferred from the request
    pub fn infer_capabilities(request: &str) -> Vec<String> {
        let text = request.to_lowercase();
        let capabilities: Vec<String> = CAPABILITIES
            .iter()
            .filter(|(_, keywords)| mentions_any(&text, keywords))
            .map(|(capability, _)| (*capability).to_string())
            .collect();

        if capabilities.is_empty() {
            vec!["problem_solving".to_string()]
        } else {
            capabilities
        }
    }

    /// Personality key inferred from the request
    pub fn infer_personality(request: &str) -> &'static str {
        let text = request.to_lowercase();
        if mentions_any(&text, &["分析", "审查", "评估", "review", "audit", "analy"]) {
            "analytical_critical"
        } else if mentions_any(&text, &["创意", "创新", "头脑风暴", "creative", "brainstorm"]) {
            "creative_innovative"
        } else if mentions_any(&text, &["助手", "客服", "辅导", "assistant", "support", "tutor"]) {
            "friendly_supportive"
        } else if mentions_any(&text, &["快速", "高效", "fast", "quick"]) {
            "direct_efficient"
        } else {
            "professional_precise"
        }
    }
}

impl SkillHandler for AgentCreatorSkill {
    fn name(&self) -> &str {
        NAME
    }

    fn generate(&self, message: &str, context: &Context) -> Result<String> {
        let request = require_request(NAME, message)?;

        let domain = context_str(context, "domain")
            .map_or_else(|| Self::infer_domain(request).to_string(), str::to_string);

        let mut capabilities = context_list(context, "capabilities");
        if capabilities.is_empty() {
            capabilities = Self::infer_capabilities(request);
        }

        let requested = context_str(context, "personality");
        let (key, title, traits) = PERSONALITIES
            .iter()
            .find(|(key, _, _)| Some(*key) == requested)
            .or_else(|| {
                let inferred = Self::infer_personality(request);
                PERSONALITIES.iter().find(|(key, _, _)| *key == inferred)
            })
            .copied()
            .unwrap_or(PERSONALITIES[0]);

        debug!(
            "Agent for domain '{}' with {} capabilities ({})",
            domain,
            capabilities.len(),
            key
        );

        let instructions = [
            format!("Stay within the {domain} domain and say so when a request falls outside it"),
            format!(
                "Lead with the {} capability when several apply",
                capabilities.first().map_or("problem_solving", String::as_str)
            ),
            "Ask for missing inputs before producing a final answer".to_string(),
            "State assumptions explicitly".to_string(),
        ];
        let numbered: String = instructions
            .iter()
            .enumerate()
            .map(|(i, line)| format!("{}. {}\n", i + 1, line))
            .collect();

        Ok(format!(
            "# Agent Definition\n\n\
             ## Role\n\nSpecialist agent for: {request}\n\n\
             ## Domain\n\n{domain}\n\n\
             ## Capabilities\n\n{}\n\
             ## Personality\n\n**{title}** (`{key}`): {traits}\n\n\
             ## Instructions\n\n{numbered}",
            bullets(&capabilities),
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_infer_domain() {
        assert_eq!(AgentCreatorSkill::infer_domain("创建一个银行风控智能体"), "finance");
        assert_eq!(AgentCreatorSkill::infer_domain("an agent for patient intake"), "healthcare");
        assert_eq!(AgentCreatorSkill::infer_domain("创建一个智能体"), "general");
    }

    #[test]
    fn test_infer_capabilities_defaults_to_problem_solving() {
        assert_eq!(
            AgentCreatorSkill::infer_capabilities("创建一个智能体"),
            vec!["problem_solving"]
        );
        assert_eq!(
            AgentCreatorSkill::infer_capabilities("数据分析和文档写作助手"),
            vec!["data_analysis", "documentation"]
        );
    }

    #[test]
    fn test_generate_definition() {
        let output = AgentCreatorSkill
            .generate("创建一个代码审查智能体", &Context::new())
            .unwrap();

        assert!(output.starts_with("# Agent Definition"));
        assert!(output.contains("## Domain\n\nsoftware"));
        assert!(output.contains("- programming"));
        assert!(output.contains("`analytical_critical`"));
        assert!(output.contains("1. Stay within the software domain"));
    }

    #[test]
    fn test_context_overrides_inference() {
        let mut context = Context::new();
        context.insert("domain".to_string(), json!("logistics"));
        context.insert("capabilities".to_string(), json!(["routing", "scheduling"]));
        context.insert("personality".to_string(), json!("direct_efficient"));

        let output = AgentCreatorSkill.generate("创建一个智能体", &context).unwrap();
        assert!(output.contains("## Domain\n\nlogistics"));
        assert!(output.contains("- routing\n- scheduling\n"));
        assert!(output.contains("`direct_efficient`"));
        assert!(output.contains("Lead with the routing capability"));
    }

    #[test]
    fn test_unknown_personality_falls_back_to_inference() {
        let mut context = Context::new();
        context.insert("personality".to_string(), json!("grumpy"));

        let output = AgentCreatorSkill.generate("客服助手", &context).unwrap();
        assert!(output.contains("`friendly_supportive`"));
    }

    #[test]
    fn test_empty_request_is_rejected() {
        assert!(AgentCreatorSkill.generate(" ", &Context::new()).is_err());
    }
}
