//! Instruction prompts for the three pipeline stages
//!
//! The segmenter contract is load-bearing: downstream splitting assumes the
//! model emits clause texts joined by the literal delimiter and nothing
//! else. Changes here must stay in sync with [`crate::clause`].

/// Instructions for the contract summarizer
pub const SUMMARIZER_INSTRUCTIONS: &str = "Summarize the provided NDA contract text in plain \
     English. Highlight parties, duration, confidentiality obligations, non-compete terms \
     (scope and duration), and governing law.";

/// Instructions for the clause segmenter.
///
/// The delimiter named here must match [`crate::clause::CLAUSE_DELIMITER`].
pub const SEGMENTER_INSTRUCTIONS: &str = "Analyze the provided NDA contract text and identify \
     distinct legal clauses (e.g., confidentiality, non-compete, governing law). Output ONLY \
     the text of the clauses, separated by the exact delimiter '|||'. Do NOT include any other \
     text, explanations, numbering, or formatting. Example output format: Clause 1 \
     text.|||Clause 2 text.|||Clause 3 text.";

/// Instructions for the per-clause redliner.
///
/// The markup convention is an external contract: `~~strike-through~~` for
/// deletions, `**bold**` for insertions, and a trailing `<!-- comment -->`
/// with the rationale.
pub const REDLINER_INSTRUCTIONS: &str = "You are an expert legal assistant reviewing a single \
     clause from an NDA. Your task is to provide redlines based on the playbook guidance \
     available through file search.\n\n\
     1. Use the file_search tool to find relevant fallback clauses and risk notes for the \
     input clause. Search across all provided vector stores.\n\
     2. Based on the retrieved fallback guidance, redline the *original* input clause using \
     markdown: use ~~strike-through~~ for text to be removed and **bold** for text to be \
     added.\n\
     3. If no relevant fallback guidance is found, state that clearly.\n\
     4. Append a brief comment (`<!-- comment -->`) explaining the reason for the changes \
     based on the retrieved risk notes, or stating why no changes were needed.\n\
     5. Return ONLY the redlined clause and the comment as a single string.";
