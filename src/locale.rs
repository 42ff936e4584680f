use std::str::FromStr;

use anyhow::bail;

/// Language used for every user-visible string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    En,
    Ko,
}

impl FromStr for Locale {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "english" => Ok(Locale::En),
            "ko" | "ko-kr" | "korean" => Ok(Locale::Ko),
            other => bail!("unsupported locale `{other}` (expected `en` or `ko`)"),
        }
    }
}

macro_rules! strings {
    ($($(#[$doc:meta])* $name:ident => $en:literal, $ko:literal;)*) => {
        impl Locale {
            $(
                $(#[$doc])*
                pub fn $name(self) -> &'static str {
                    match self {
                        Locale::En => $en,
                        Locale::Ko => $ko,
                    }
                }
            )*
        }
    };
}

strings! {
    empty_document => "Please enter the document text.", "문서 내용을 입력해주세요.";
    empty_query => "Please enter a question.", "질문을 입력해주세요.";
    /// Fallback when an upload fails without a server message.
    upload_failed => "Failed to upload the document.", "문서 업로드에 실패했습니다.";
    /// Fallback when a query fails without a server message.
    query_failed => "Failed to process the query.", "쿼리 처리에 실패했습니다.";
    /// Fallback when deletion fails without a server message.
    delete_failed => "Failed to delete the collection.", "컬렉션 삭제에 실패했습니다.";
    health_failed => "Health check failed.", "서버 상태 확인에 실패했습니다.";
    upload_succeeded => "Document uploaded successfully!", "문서가 성공적으로 업로드되었습니다!";
    delete_confirm =>
        "Really delete all documents? This cannot be undone.",
        "정말로 모든 문서를 삭제하시겠습니까? 이 작업은 되돌릴 수 없습니다.";
    delete_succeeded => "Collection deleted successfully.", "컬렉션이 성공적으로 삭제되었습니다.";
    server_status => "Server status", "서버 상태";
    version => "Version", "버전";
    answer => "Answer", "답변";
    sources => "Sources", "참고 문서";
    sources_hint => "Documents used to generate the answer.", "답변 생성에 사용된 문서들입니다.";
    source => "Source", "소스";
    similarity => "Similarity", "유사도";
    top_k_label => "Results", "검색 결과 수";
    document_prompt => "Enter the document text:", "문서 내용을 입력하세요:";
    question_prompt => "Enter your question:", "질문을 입력하세요:";
    top_k_usage => "usage: :k <integer>", "사용법: :k <정수>";
    unknown_command => "unknown command, try :help", "알 수 없는 명령입니다. :help를 입력해 보세요.";
    shell_help => "\
Type a question and press Enter to ask it. End a line with `\\` to continue on the next line.
  :upload     enter a document, finish with a line containing only `.`
  :k <n>      set how many sources to retrieve
  :delete     delete every indexed document
  :health     show the server status
  :help       show this help
  :quit       leave", "\
질문을 입력하고 Enter를 누르세요. 줄 끝에 `\\`를 붙이면 다음 줄에서 이어서 입력합니다.
  :upload     문서를 입력합니다. `.`만 있는 줄로 끝냅니다
  :k <n>      검색할 소스 수를 설정합니다
  :delete     인덱싱된 모든 문서를 삭제합니다
  :health     서버 상태를 표시합니다
  :help       도움말을 표시합니다
  :quit       종료합니다";
}
