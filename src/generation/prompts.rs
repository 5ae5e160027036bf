/*!
 * Prompt templates for script generation and research.
 *
 * Templates live here so the wording is reviewable in one place. Builders
 * fill in the per-document values; they never touch the network.
 */

use crate::document::Document;
use crate::script_parser::Speaker;

/// System prompt framing the model as a podcast script writer
const SCRIPT_SYSTEM_PROMPT: &str = "You are a professional podcast script writer. \
You write natural, engaging two-speaker dialogue that sounds like a real \
conversation, not a lecture. You follow formatting instructions exactly.";

/// System prompt for the research pass on short source material
const RESEARCH_SYSTEM_PROMPT: &str = "You are a research assistant. You write \
factual, well-organized background material in plain prose. You never invent \
sources or statistics.";

/// Builder for the script generation prompt
#[derive(Debug, Clone)]
pub struct ScriptPromptBuilder {
    title: String,
    excerpt: String,
    target_words: usize,
}

impl ScriptPromptBuilder {
    /// Create a builder for the given document excerpt and length target
    pub fn new(document: &Document, max_source_chars: usize, target_words: usize) -> Self {
        Self {
            title: document.title.clone(),
            excerpt: document.excerpt(max_source_chars),
            target_words,
        }
    }

    /// The system prompt to send alongside the user prompt
    pub fn system_prompt(&self) -> String {
        SCRIPT_SYSTEM_PROMPT.to_string()
    }

    /// Build the user prompt: the episode brief, formatting rules, and the
    /// source excerpt
    pub fn build(&self) -> String {
        format!(
            "Write a podcast episode script about the article below. The episode has two \
             speakers:\n\
             - {host}: Alex, the curious host who guides the conversation\n\
             - {expert}: Dr. Sarah, the subject-matter expert\n\
             \n\
             Structure the episode as: a short intro welcoming listeners, background context, \
             a deep dive into the main points, practical implications, key takeaways, and a \
             brief outro.\n\
             \n\
             Formatting rules:\n\
             - Mark every turn with the speaker tag [{host}] or [{expert}] at the start of \
             the line.\n\
             - Identify speakers only by their tag. Do not repeat their names before their \
             lines.\n\
             - Write spoken dialogue only. No stage directions, no sound effects, no \
             narration like (laughs) or *pauses*.\n\
             - Aim for approximately {target_words} words in total.\n\
             \n\
             Article title: {title}\n\
             \n\
             Article content:\n\
             {excerpt}",
            host = Speaker::Host.tag(),
            expert = Speaker::Expert.tag(),
            target_words = self.target_words,
            title = self.title,
            excerpt = self.excerpt,
        )
    }
}

/// Build the research prompt used to expand short source material.
/// Returns the (system, user) prompt pair.
pub fn build_research_prompt(document: &Document, needed_words: usize) -> (String, String) {
    let user_prompt = format!(
        "The article below is too short to carry a full podcast episode. Write approximately \
         {needed_words} words of additional background material a host could draw on: recent \
         developments on the topic, relevant statistics, expert opinions with attribution, \
         and illustrative anecdotes. Plain prose only, no headings, no bullet lists.\n\
         \n\
         Article title: {title}\n\
         \n\
         Article content:\n\
         {body}",
        needed_words = needed_words,
        title = document.title,
        body = document.body,
    );
    (RESEARCH_SYSTEM_PROMPT.to_string(), user_prompt)
}
