//! Turns user actions into model requests and records the results.
//!
//! Building a `Request` only borrows the session, and sending it
//! doesn't touch the session at all, so callers that share a session
//! behind a lock can release it while the call is in flight and
//! `record` the exchange afterwards. Callers that own their session
//! can use `describe`, `ask` and `analyze` which do all three steps.

use crate::ai::model::{BoxedModel, Part};
use crate::ai::prompt::{DESCRIBE_INSTRUCTION, MISSING_ATTACHMENT, MISSING_PROMPT, MISSING_QUESTION};
use crate::core::AppError;
use crate::session::{Attachment, Exchange, Session};

/// A validated request, ready to send.
#[derive(Clone, Debug)]
pub struct Request {
    user_input: String,
    attachment: Option<Attachment>,
}

impl Request {
    pub fn describe(session: &Session) -> Result<Self, AppError> {
        let attachment = current_attachment(session)?;
        Ok(Self {
            user_input: DESCRIBE_INSTRUCTION.to_string(),
            attachment: Some(attachment),
        })
    }

    pub fn ask(session: &Session, question: &str) -> Result<Self, AppError> {
        if question.is_empty() {
            return Err(AppError::validation(MISSING_QUESTION));
        }
        let attachment = current_attachment(session)?;
        Ok(Self {
            user_input: question.to_string(),
            attachment: Some(attachment),
        })
    }

    pub fn analyze(prompt: &str) -> Result<Self, AppError> {
        if prompt.is_empty() {
            return Err(AppError::validation(MISSING_PROMPT));
        }
        Ok(Self {
            user_input: prompt.to_string(),
            attachment: None,
        })
    }

    pub fn user_input(&self) -> &str {
        &self.user_input
    }

    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }

    /// The text comes first, followed by the attachment if any.
    pub fn parts(&self) -> Vec<Part> {
        let mut parts = vec![Part::text(&self.user_input)];
        if let Some(attachment) = &self.attachment {
            parts.push(Part::from(attachment));
        }
        parts
    }
}

fn current_attachment(session: &Session) -> Result<Attachment, AppError> {
    session
        .attachment()
        .cloned()
        .ok_or_else(|| AppError::validation(MISSING_ATTACHMENT))
}

#[derive(Clone)]
pub struct Dispatcher {
    model: BoxedModel,
    model_name: String,
}

impl Dispatcher {
    pub fn new(model: BoxedModel, model_name: &str) -> Self {
        Self {
            model,
            model_name: model_name.to_string(),
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Makes exactly one call to the model. Every failure is reported
    /// as `AppError::RemoteCall`.
    pub async fn send(&self, request: &Request) -> Result<Exchange, AppError> {
        tracing::debug!(
            "Sending request to {} (attachment: {:?})",
            self.model_name,
            request.attachment().map(Attachment::file_name)
        );
        let response = self
            .model
            .generate_content(&request.parts(), &self.model_name)
            .await
            .map_err(|e| {
                tracing::error!("Model call failed: {:#}", e);
                AppError::RemoteCall(e)
            })?;
        Ok(Exchange::new(request.user_input(), &response))
    }

    pub async fn describe(&self, session: &mut Session) -> Result<Exchange, AppError> {
        let request = Request::describe(session)?;
        self.run(session, request).await
    }

    pub async fn ask(&self, session: &mut Session, question: &str) -> Result<Exchange, AppError> {
        let request = Request::ask(session, question)?;
        self.run(session, request).await
    }

    pub async fn analyze(&self, session: &mut Session, prompt: &str) -> Result<Exchange, AppError> {
        let request = Request::analyze(prompt)?;
        self.run(session, request).await
    }

    async fn run(&self, session: &mut Session, request: Request) -> Result<Exchange, AppError> {
        let exchange = self.send(&request).await?;
        session.record(exchange.clone());
        Ok(exchange)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use anyhow::{Error, Result, anyhow};
    use async_trait::async_trait;

    use super::*;
    use crate::ai::GenerativeModel;

    /// Replies with a fixed result and remembers every call.
    struct FakeModel {
        reply: Result<String, String>,
        calls: Mutex<Vec<(Vec<Part>, String)>>,
    }

    impl FakeModel {
        fn replying(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(text.to_string()),
                calls: Mutex::new(vec![]),
            })
        }

        fn failing(msg: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(msg.to_string()),
                calls: Mutex::new(vec![]),
            })
        }

        fn calls(&self) -> Vec<(Vec<Part>, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GenerativeModel for FakeModel {
        async fn generate_content(&self, parts: &[Part], model: &str) -> Result<String, Error> {
            self.calls
                .lock()
                .unwrap()
                .push((parts.to_vec(), model.to_string()));
            self.reply.clone().map_err(|e| anyhow!(e))
        }
    }

    fn dispatcher(model: Arc<FakeModel>) -> Dispatcher {
        Dispatcher::new(model, "gemini-2.5-flash")
    }

    fn session_with(name: &str, data: &'static [u8]) -> Session {
        let mut session = Session::new();
        session.attach(Attachment::new(name, "image/jpeg", data));
        session
    }

    #[tokio::test]
    async fn test_describe_records_exchange() {
        let model = FakeModel::replying("A striped cat.");
        let mut session = session_with("cat.jpg", b"meow");

        let exchange = dispatcher(model.clone()).describe(&mut session).await.unwrap();

        assert_eq!(exchange.response, "A striped cat.");
        assert_eq!(
            session.log().entries(),
            &[Exchange::new("Describe this image in detail.", "A striped cat.")]
        );

        let calls = model.calls();
        assert_eq!(calls.len(), 1);
        let (parts, model_name) = &calls[0];
        assert_eq!(model_name, "gemini-2.5-flash");
        assert_eq!(
            parts,
            &vec![
                Part::text(DESCRIBE_INSTRUCTION),
                Part::Blob {
                    mime_type: "image/jpeg".to_string(),
                    data: bytes::Bytes::from_static(b"meow"),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_describe_without_attachment_makes_no_call() {
        let model = FakeModel::replying("unused");
        let mut session = Session::new();

        let result = dispatcher(model.clone()).describe(&mut session).await;

        assert!(matches!(result, Err(AppError::Validation(ref m)) if m == MISSING_ATTACHMENT));
        assert!(model.calls().is_empty());
        assert!(session.log().is_empty());
    }

    #[tokio::test]
    async fn test_ask_with_empty_question_makes_no_call() {
        let model = FakeModel::replying("unused");
        let mut session = session_with("cat.jpg", b"meow");

        let result = dispatcher(model.clone()).ask(&mut session, "").await;
        assert!(matches!(result, Err(AppError::Validation(ref m)) if m == MISSING_QUESTION));

        assert!(model.calls().is_empty());
        assert!(session.log().is_empty());
    }

    #[tokio::test]
    async fn test_whitespace_input_is_sent() {
        let model = FakeModel::replying("ok");
        let mut session = session_with("cat.jpg", b"meow");
        let d = dispatcher(model.clone());

        d.ask(&mut session, "   ").await.unwrap();
        d.analyze(&mut session, " ").await.unwrap();

        assert_eq!(model.calls().len(), 2);
        assert_eq!(
            session.log().entries(),
            &[Exchange::new("   ", "ok"), Exchange::new(" ", "ok")]
        );
    }

    #[tokio::test]
    async fn test_ask_sends_question_then_image() {
        let model = FakeModel::replying("Orange.");
        let mut session = session_with("cat.jpg", b"meow");

        dispatcher(model.clone())
            .ask(&mut session, "What color is it?")
            .await
            .unwrap();

        let (parts, _) = &model.calls()[0];
        assert_eq!(parts[0], Part::text("What color is it?"));
        assert!(matches!(parts[1], Part::Blob { .. }));
        assert_eq!(session.log().entries()[0], Exchange::new("What color is it?", "Orange."));
    }

    #[tokio::test]
    async fn test_analyze_appends_exactly_one_entry() {
        let model = FakeModel::replying("42");
        let mut session = Session::new();
        let d = dispatcher(model.clone());

        for (i, prompt) in ["meaning of life", " padded ", "π?"].iter().enumerate() {
            d.analyze(&mut session, prompt).await.unwrap();
            assert_eq!(session.log().len(), i + 1);
            assert_eq!(session.log().entries()[i].user, *prompt);
        }

        // Text only, no attachment
        assert!(model.calls().iter().all(|(parts, _)| parts.len() == 1));
    }

    #[tokio::test]
    async fn test_analyze_empty_prompt_makes_no_call() {
        let model = FakeModel::replying("unused");
        let mut session = Session::new();
        session.record(Exchange::new("earlier", "reply"));

        let result = dispatcher(model.clone()).analyze(&mut session, "").await;

        assert!(matches!(result, Err(AppError::Validation(ref m)) if m == MISSING_PROMPT));
        assert!(model.calls().is_empty());
        assert_eq!(session.log().len(), 1);
    }

    #[tokio::test]
    async fn test_remote_failure_leaves_log_unchanged() {
        let model = FakeModel::failing("connection reset");
        let mut session = session_with("cat.jpg", b"meow");
        let d = dispatcher(model.clone());

        let err = d.describe(&mut session).await.unwrap_err();
        assert_eq!(err.user_message(), "⚠️ Error: connection reset");

        let err = d.analyze(&mut session, "hello").await.unwrap_err();
        assert!(matches!(err, AppError::RemoteCall(_)));

        assert_eq!(model.calls().len(), 2);
        assert!(session.log().is_empty());
    }

    #[tokio::test]
    async fn test_replaced_attachment_is_used() {
        let model = FakeModel::replying("ok");
        let mut session = session_with("cat.jpg", b"cat-bytes");
        session.attach(Attachment::new("dog.png", "image/png", &b"dog-bytes"[..]));

        dispatcher(model.clone()).describe(&mut session).await.unwrap();

        let (parts, _) = &model.calls()[0];
        assert_eq!(
            parts[1],
            Part::Blob {
                mime_type: "image/png".to_string(),
                data: bytes::Bytes::from_static(b"dog-bytes"),
            }
        );
    }

    #[test]
    fn test_request_keeps_user_input_verbatim() {
        let request = Request::analyze("  spaced  ").unwrap();
        assert_eq!(request.user_input(), "  spaced  ");
        assert!(request.attachment().is_none());
    }
}
