//! Prompt augmentation template.

/// Merges the original query and a context block into the final prompt.
///
/// Purely textual; the instruction tells the model to answer from the context
/// and to say so when falling back to general knowledge.
pub fn build_prompt(query: &str, context: &str) -> String {
    format!(
        "I'll provide you with some relevant context to help answer the following question.\n\n\
         Question: {}\n\n\
         {}\n\n\
         Please provide an answer based on the context provided. If the context doesn't \
         contain relevant information, say so and try to provide a general answer.",
        query, context,
    )
}
