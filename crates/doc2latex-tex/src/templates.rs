//! Named LaTeX document templates.
//!
//! Every template fills the same skeleton: preamble, title block, optional
//! subtitle, body, optional signature block, closing. Metadata values are
//! always escaped in plain mode; the body goes through [`clean_content`].

use doc2latex_core::Metadata;
use tracing::{debug, warn};

use crate::escape::{clean_content, escape_plain};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateId {
    Government,
    Academic,
    Legal,
    CorporateReport,
    Minimal,
}

impl TemplateId {
    pub const ALL: [TemplateId; 5] = [
        Self::Government,
        Self::Academic,
        Self::Legal,
        Self::CorporateReport,
        Self::Minimal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Government => "indian_government",
            Self::Academic => "academic_formal",
            Self::Legal => "legal_standard",
            Self::CorporateReport => "corporate_report",
            Self::Minimal => "minimal",
        }
    }

    /// Resolve a template id. Unknown ids fall back to the government
    /// template; this is never an error.
    pub fn from_id(id: &str) -> Self {
        let id = id.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == id)
            .unwrap_or_else(|| {
                warn!(template = id, "unknown template, using indian_government");
                Self::Government
            })
    }
}

impl std::fmt::Display for TemplateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render a complete document. `content` is escaped with the mode detected
/// from its own text.
pub fn render(template_id: &str, metadata: &Metadata, content: &str) -> String {
    let body = clean_content(content);
    render_escaped(TemplateId::from_id(template_id), metadata, &body)
}

/// Render with a body that is already safe LaTeX. Metadata is still escaped.
pub(crate) fn render_escaped(id: TemplateId, metadata: &Metadata, body: &str) -> String {
    let fields = Fields::escape(metadata);
    let skeleton = match id {
        TemplateId::Government => government(&fields),
        TemplateId::Academic => academic(&fields),
        TemplateId::Legal => legal(&fields),
        TemplateId::CorporateReport => corporate_report(&fields),
        TemplateId::Minimal => minimal(&fields),
    };
    let doc = skeleton.assemble(fields.subtitle.as_deref(), body);
    debug!(template = %id, body_chars = body.len(), chars = doc.len(), "rendered document");
    doc
}

/// Metadata values escaped for direct interpolation.
struct Fields {
    title: String,
    author: String,
    department: String,
    classification: String,
    file_number: String,
    date: String,
    summary: String,
    keywords: String,
    subtitle: Option<String>,
}

impl Fields {
    fn escape(m: &Metadata) -> Self {
        Self {
            title: escape_plain(&m.title),
            author: escape_plain(&m.author),
            department: escape_plain(&m.department),
            classification: escape_plain(&m.classification),
            file_number: escape_plain(&m.file_number),
            date: escape_plain(&m.date),
            summary: escape_plain(&m.summary),
            keywords: escape_plain(&m.keywords),
            subtitle: m.subtitle.as_deref().map(escape_plain),
        }
    }
}

struct Skeleton {
    preamble: String,
    title_block: String,
    signature: Option<String>,
    closing: &'static str,
}

impl Skeleton {
    fn assemble(self, subtitle: Option<&str>, body: &str) -> String {
        let mut out = self.preamble;
        out.push_str("\n\\begin{document}\n\n");
        out.push_str(&self.title_block);
        out.push('\n');
        if let Some(subtitle) = subtitle {
            out.push_str(&format!(
                "\\begin{{center}}\\large\\textit{{{subtitle}}}\\end{{center}}\n\\vspace{{1em}}\n\n"
            ));
        }
        out.push_str("% Main content\n");
        out.push_str(body);
        out.push_str("\n\n");
        if let Some(signature) = self.signature {
            out.push_str(&signature);
            out.push('\n');
        }
        out.push_str(self.closing);
        out.push_str("\\end{document}\n");
        out
    }
}

const BASE_PACKAGES: &str = r"\usepackage[utf8]{inputenc}
\usepackage[T1]{fontenc}
";

fn government(f: &Fields) -> Skeleton {
    let preamble = format!(
        r"\documentclass[11pt,a4paper]{{article}}

% Government of India office document
{BASE_PACKAGES}\usepackage{{geometry}}
\usepackage{{xcolor}}
\usepackage{{fancyhdr}}
\usepackage{{titlesec}}
\usepackage{{graphicx}}
\usepackage{{amsmath}}
\usepackage{{amssymb}}
\usepackage{{hyperref}}
\usepackage{{enumitem}}
\usepackage{{longtable}}
\usepackage{{booktabs}}

\geometry{{top=2.5cm, bottom=2.5cm, left=3cm, right=2.5cm, headheight=1.5cm, headsep=1cm, footskip=1cm}}

\definecolor{{saffron}}{{RGB}}{{255, 153, 51}}
\definecolor{{navyblue}}{{RGB}}{{0, 0, 128}}
\definecolor{{darkgreen}}{{RGB}}{{19, 136, 8}}

\pagestyle{{fancy}}
\fancyhf{{}}
\fancyhead[C]{{%
    \begin{{minipage}}{{\textwidth}}
        \centering
        \textbf{{\large Government of India}} \\[0.2cm]
        \textbf{{\normalsize {department}}} \\[0.1cm]
        \rule{{\textwidth}}{{0.5pt}}
    \end{{minipage}}
}}
\fancyfoot[C]{{\thepage}}
\fancyfoot[L]{{\small Classification: {classification}}}
\fancyfoot[R]{{\small {date}}}

\titleformat{{\section}}{{\normalfont\Large\bfseries\color{{navyblue}}}}{{\thesection}}{{1em}}{{}}
\titleformat{{\subsection}}{{\normalfont\large\bfseries\color{{darkgreen}}}}{{\thesubsection}}{{1em}}{{}}

\title{{{title}}}
\author{{{author}}}
\date{{{date}}}
",
        department = f.department,
        classification = f.classification,
        date = f.date,
        title = f.title,
        author = f.author,
    );
    let title_block = format!(
        r"\begin{{center}}
    {{\Large \textbf{{\color{{saffron}}Government of India}}}} \\[0.2cm]
    {{\large \textbf{{{department}}}}} \\[0.3cm]
    \rule{{0.8\textwidth}}{{1pt}}
\end{{center}}

\vspace{{0.5cm}}

\begin{{flushleft}}
    \textbf{{File No.: }}{file_number} \\[0.3cm]
    \textbf{{Dated: }}{date} \\[0.5cm]
\end{{flushleft}}

\begin{{center}}
    {{\Large \textbf{{\color{{navyblue}}{title}}}}}
\end{{center}}
",
        department = f.department,
        file_number = f.file_number,
        date = f.date,
        title = f.title,
    );
    let signature = format!(
        r"\vspace{{2cm}}

\begin{{flushright}}
    \begin{{minipage}}{{6cm}}
        \centering
        \rule{{5cm}}{{0.5pt}} \\[0.2cm]
        ({author}) \\
        {department} \\
        Government of India
    \end{{minipage}}
\end{{flushright}}
",
        author = f.author,
        department = f.department,
    );
    Skeleton {
        preamble,
        title_block,
        signature: Some(signature),
        closing: r"\vfill
\begin{center}
    \rule{\textwidth}{0.5pt} \\[0.2cm]
    \small This document is generated electronically and is valid without signature \\
    \textit{Satyameva Jayate}
\end{center}

",
    }
}

fn academic(f: &Fields) -> Skeleton {
    let preamble = format!(
        r"\documentclass[12pt,a4paper]{{article}}

% Academic paper
{BASE_PACKAGES}\usepackage{{geometry}}
\usepackage{{xcolor}}
\usepackage{{titlesec}}
\usepackage{{graphicx}}
\usepackage{{amsmath}}
\usepackage{{amssymb}}
\usepackage{{hyperref}}
\usepackage{{authblk}}

\geometry{{top=2.5cm, bottom=2.5cm, left=2.5cm, right=2.5cm}}

\definecolor{{academicblue}}{{RGB}}{{0, 51, 102}}
\definecolor{{titlecolor}}{{RGB}}{{139, 0, 0}}

\titleformat{{\section}}{{\normalfont\large\bfseries\color{{academicblue}}}}{{\thesection}}{{1em}}{{}}

\title{{\Large \textbf{{\color{{titlecolor}}{title}}}}}
\author{{{author}}}
\affil{{{department}}}
\date{{{date}}}
",
        title = f.title,
        author = f.author,
        department = f.department,
        date = f.date,
    );
    let title_block = format!(
        r"\maketitle

\begin{{abstract}}
{summary}
\end{{abstract}}

\textbf{{Keywords:}} {keywords}

\tableofcontents
\newpage
",
        summary = f.summary,
        keywords = f.keywords,
    );
    Skeleton {
        preamble,
        title_block,
        signature: None,
        closing: "",
    }
}

fn legal(f: &Fields) -> Skeleton {
    let preamble = format!(
        r"\documentclass[12pt,a4paper]{{article}}

% Legal document
{BASE_PACKAGES}\usepackage{{geometry}}
\usepackage{{xcolor}}
\usepackage{{fancyhdr}}
\usepackage{{titlesec}}
\usepackage{{enumerate}}

\geometry{{top=2.5cm, bottom=2.5cm, left=3.5cm, right=2.5cm, headheight=1cm}}

\definecolor{{legalblue}}{{RGB}}{{0, 0, 139}}

\pagestyle{{fancy}}
\fancyhf{{}}
\fancyhead[C]{{\textbf{{Legal Document}}}}
\fancyfoot[L]{{\small {classification}}}
\fancyfoot[C]{{\thepage}}

\renewcommand{{\thesection}}{{\Roman{{section}}}}
\renewcommand{{\thesubsection}}{{\arabic{{subsection}}}}

\title{{\textbf{{\color{{legalblue}}{title}}}}}
\author{{{author}}}
\date{{{date}}}
",
        classification = f.classification,
        title = f.title,
        author = f.author,
        date = f.date,
    );
    let signature = format!(
        r"\vspace{{2cm}}
\noindent\rule{{6cm}}{{0.5pt}} \\
{author} \\
{department}
",
        author = f.author,
        department = f.department,
    );
    Skeleton {
        preamble,
        title_block: "\\maketitle\n".to_string(),
        signature: Some(signature),
        closing: "",
    }
}

fn corporate_report(f: &Fields) -> Skeleton {
    let preamble = format!(
        r"\documentclass[11pt,a4paper]{{report}}

% Corporate report
{BASE_PACKAGES}\usepackage{{geometry}}
\usepackage{{xcolor}}
\usepackage{{fancyhdr}}
\usepackage{{titlesec}}
\usepackage{{graphicx}}
\usepackage{{hyperref}}

\geometry{{top=2.5cm, bottom=2.5cm, left=3cm, right=2.5cm}}

\definecolor{{reportblue}}{{RGB}}{{0, 82, 155}}
\definecolor{{reportgray}}{{RGB}}{{64, 64, 64}}

\titleformat{{\chapter}}{{\normalfont\huge\bfseries\color{{reportblue}}}}{{\thechapter}}{{1em}}{{}}
\titleformat{{\section}}{{\normalfont\Large\bfseries\color{{reportgray}}}}{{\thesection}}{{1em}}{{}}

\title{{\Huge \textbf{{\color{{reportblue}}{title}}}}}
\author{{{author} \\ {department}}}
\date{{{date}}}
",
        title = f.title,
        author = f.author,
        department = f.department,
        date = f.date,
    );
    let title_block = format!(
        r"\maketitle

\tableofcontents

\chapter{{Executive Summary}}
{summary}

\chapter{{Report}}
",
        summary = f.summary,
    );
    Skeleton {
        preamble,
        title_block,
        signature: None,
        closing: "",
    }
}

fn minimal(f: &Fields) -> Skeleton {
    let preamble = format!(
        r"\documentclass[11pt,a4paper]{{article}}

{BASE_PACKAGES}
\title{{{title}}}
\author{{{author}}}
\date{{{date}}}
",
        title = f.title,
        author = f.author,
        date = f.date,
    );
    Skeleton {
        preamble,
        title_block: "\\maketitle\n".to_string(),
        signature: None,
        closing: "",
    }
}
