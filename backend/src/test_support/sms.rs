//! Scripted SMS gateway that records every send.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::PhoneNumber;
use crate::domain::ports::{SmsGateway, SmsGatewayError, SmsReceipt};

/// One recorded send attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub to: String,
    pub body: String,
}

/// Gateway that accepts every number unless a failure is scripted for it.
#[derive(Default)]
pub struct ScriptedSmsGateway {
    failures: Mutex<HashMap<String, SmsGatewayError>>,
    sent: Mutex<Vec<SentMessage>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

impl ScriptedSmsGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every send to `phone` with `error`.
    pub fn fail_for(&self, phone: impl Into<String>, error: SmsGatewayError) {
        lock(&self.failures).insert(phone.into(), error);
    }

    /// Every attempt, successful or not, in call order.
    pub fn attempts(&self) -> Vec<SentMessage> {
        lock(&self.sent).clone()
    }
}

#[async_trait]
impl SmsGateway for ScriptedSmsGateway {
    async fn send(&self, to: &PhoneNumber, body: &str) -> Result<SmsReceipt, SmsGatewayError> {
        let attempt = {
            let mut sent = lock(&self.sent);
            sent.push(SentMessage {
                to: to.as_ref().to_owned(),
                body: body.to_owned(),
            });
            sent.len()
        };
        if let Some(error) = lock(&self.failures).get(to.as_ref()) {
            return Err(error.clone());
        }
        Ok(SmsReceipt {
            message_id: format!("SM{attempt:032}"),
        })
    }
}
