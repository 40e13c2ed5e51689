// Technical question generation: external generator boundary plus deterministic cleanup.
// All LLM calls go through llm_client: no direct Anthropic calls here.

pub mod generator;
pub mod postprocess;
pub mod prompts;
