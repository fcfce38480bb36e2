use doc2latex_core::DocumentAnalysis;

// ── Classification ──

pub(crate) const CLASSIFY_SYSTEM_PROMPT: &str = "\
You are an expert in Indian government document formatting and classification. \
Analyze documents according to Government of India standards and best practices. \
Focus on accurate document type detection and metadata extraction.";

pub(crate) fn build_classify_prompt(excerpt: &str) -> String {
    format!(
        "Analyze the following document text and provide a comprehensive analysis in JSON format.\n\
         The document should be classified according to Indian government and institutional standards.\n\
         \n\
         Document Text:\n\
         {excerpt}...\n\
         \n\
         Respond with a JSON object in exactly this shape:\n\
         {{\n\
         \x20 \"document_type\": \"one of: office_memorandum, circular, notification, research_paper, report, letter, policy_document, tender_document, academic_paper, legal_document, financial_report, unknown\",\n\
         \x20 \"title\": \"extracted or inferred document title\",\n\
         \x20 \"author\": \"extracted author or signing officer\",\n\
         \x20 \"department\": \"government department or institution\",\n\
         \x20 \"classification\": \"Public, Restricted, Confidential or Secret\",\n\
         \x20 \"summary\": \"brief summary of the document\",\n\
         \x20 \"key_sections\": [\"main\", \"section\", \"names\"],\n\
         \x20 \"formatting_requirements\": {{\n\
         \x20   \"header_style\": \"formal/semi-formal/academic\",\n\
         \x20   \"numbering_style\": \"indian_government/academic/legal\",\n\
         \x20   \"reference_style\": \"government/academic/legal\",\n\
         \x20   \"language_style\": \"formal_hindi_english/formal_english/technical\"\n\
         \x20 }},\n\
         \x20 \"suggested_template\": \"indian_government/academic_formal/legal_standard/corporate_report\",\n\
         \x20 \"confidence_score\": 0.95\n\
         }}\n\
         \n\
         Consider Indian government document formatting standards and hierarchy."
    )
}

// ── Enhancement ──

pub(crate) const ENHANCE_SYSTEM_PROMPT: &str = "\
You are an expert in Government of India document formatting, the Manual of Office Procedure, \
and official communication standards. Enhance documents to meet the highest government standards.";

pub(crate) fn build_enhance_prompt(content: &str, analysis: &DocumentAnalysis) -> String {
    format!(
        "Enhance and restructure the following document according to Indian government standards.\n\
         \n\
         Document Type: {document_type}\n\
         Current Title: {title}\n\
         Department: {department}\n\
         Classification: {classification}\n\
         \n\
         Original Text:\n\
         {content}\n\
         \n\
         Enhance this document by:\n\
         1. Improving the structure and hierarchy\n\
         2. Adding proper Indian government formatting\n\
         3. Ensuring appropriate formal language\n\
         4. Adding necessary sections if missing (headers, file numbers)\n\
         5. Keeping the original meaning while improving presentation\n\
         6. Following the Government of India Manual of Office Procedure\n\
         \n\
         Return the enhanced text in a structured form suitable for LaTeX conversion, \
         with section headings, numbering and formal language.",
        document_type = analysis.document_type,
        title = analysis.title,
        department = analysis.department,
        classification = analysis.classification,
    )
}

// ── Suggestions ──

pub(crate) const SUGGEST_SYSTEM_PROMPT: &str = "\
You are a senior government document reviewer with expertise in Indian administrative \
standards and modern document optimization techniques.";

pub(crate) fn build_suggest_prompt(excerpt: &str, analysis: &DocumentAnalysis) -> String {
    format!(
        "Review this {document_type} document and suggest specific improvements \
         to meet Indian government standards and best practices:\n\
         \n\
         {excerpt}...\n\
         \n\
         Provide 5-7 specific, actionable suggestions covering:\n\
         - Structure and organization\n\
         - Language and tone\n\
         - Compliance with government standards\n\
         - Professional presentation\n\
         - Technical accuracy\n\
         \n\
         Return them as a numbered list.",
        document_type = analysis.document_type,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc2latex_core::DocumentType;

    #[test]
    fn classify_prompt_embeds_excerpt_and_schema() {
        let p = build_classify_prompt("OFFICE MEMORANDUM");
        assert!(p.contains("Document Text:\nOFFICE MEMORANDUM..."));
        for key in [
            "\"document_type\"",
            "\"formatting_requirements\"",
            "\"language_style\"",
            "\"suggested_template\"",
            "\"confidence_score\"",
        ] {
            assert!(p.contains(key), "missing {key}");
        }
    }

    #[test]
    fn enhance_prompt_carries_analysis_context() {
        let mut a = DocumentAnalysis::default();
        a.document_type = DocumentType::LegalDocument;
        a.title = "Lease Deed".into();
        let p = build_enhance_prompt("body text", &a);
        assert!(p.contains("Document Type: legal_document"));
        assert!(p.contains("Current Title: Lease Deed"));
        assert!(p.contains("Original Text:\nbody text\n"));
        assert!(p.contains("6. Following"));
    }

    #[test]
    fn suggest_prompt_names_type() {
        let mut a = DocumentAnalysis::default();
        a.document_type = DocumentType::Circular;
        let p = build_suggest_prompt("excerpt", &a);
        assert!(p.starts_with("Review this circular document"));
        assert!(p.contains("excerpt..."));
    }
}
