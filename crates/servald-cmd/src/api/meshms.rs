use crate::engine::Engine;
use crate::error::Result;
use crate::ids::SubscriberId;
use crate::invoker::{CommandResult, Listing, ServalD, Streamed};
use crate::records::{Conversation, Message};
use crate::rows::Row;

#[must_use]
pub fn list_conversations_args(sender: &SubscriberId, offset: u64, limit: u64) -> Vec<String> {
  vec![
    "meshms".into(),
    "list".into(),
    "conversations".into(),
    sender.to_hex(),
    offset.to_string(),
    limit.to_string(),
  ]
}

#[must_use]
pub fn list_messages_args(sender: &SubscriberId, recipient: &SubscriberId) -> Vec<String> {
  vec![
    "meshms".into(),
    "list".into(),
    "messages".into(),
    sender.to_hex(),
    recipient.to_hex(),
  ]
}

#[must_use]
pub fn send_message_args(sender: &SubscriberId, recipient: &SubscriberId, text: &str) -> Vec<String> {
  vec![
    "meshms".into(),
    "send".into(),
    "message".into(),
    sender.to_hex(),
    recipient.to_hex(),
    text.to_string(),
  ]
}

#[must_use]
pub fn read_messages_args(
  sender: &SubscriberId,
  recipient: &SubscriberId,
  offset: Option<u64>,
) -> Vec<String> {
  let mut args = vec![
    "meshms".into(),
    "read".into(),
    "messages".into(),
    sender.to_hex(),
    recipient.to_hex(),
  ];
  if let Some(offset) = offset {
    args.push(offset.to_string());
  }
  args
}

impl<E: Engine> ServalD<E> {
  pub fn list_conversations(
    &self,
    sender: &SubscriberId,
    offset: u64,
    limit: u64,
    handler: impl FnMut(Row<Conversation>),
  ) -> Result<Streamed> {
    self.stream(
      Conversation::default,
      &list_conversations_args(sender, offset, limit),
      handler,
    )
  }

  pub fn list_conversations_collect(
    &self,
    sender: &SubscriberId,
    offset: u64,
    limit: u64,
  ) -> Result<Listing<Conversation>> {
    self.collect(
      Conversation::default,
      &list_conversations_args(sender, offset, limit),
    )
  }

  pub fn list_messages(
    &self,
    sender: &SubscriberId,
    recipient: &SubscriberId,
    handler: impl FnMut(Row<Message>),
  ) -> Result<Streamed> {
    self.stream(
      Message::default,
      &list_messages_args(sender, recipient),
      handler,
    )
  }

  pub fn list_messages_collect(
    &self,
    sender: &SubscriberId,
    recipient: &SubscriberId,
  ) -> Result<Listing<Message>> {
    self.collect(Message::default, &list_messages_args(sender, recipient))
  }

  pub fn send_message(
    &self,
    sender: &SubscriberId,
    recipient: &SubscriberId,
    text: &str,
  ) -> Result<CommandResult> {
    self.run(send_message_args(sender, recipient, text))
  }

  /// Marks messages as read, up to `offset` when given, otherwise all of them.
  pub fn read_messages(
    &self,
    sender: &SubscriberId,
    recipient: &SubscriberId,
    offset: Option<u64>,
  ) -> Result<CommandResult> {
    self.run(read_messages_args(sender, recipient, offset))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn read_offset_is_optional() {
    let a = SubscriberId::from([1; 32]);
    let b = SubscriberId::from([2; 32]);
    assert_eq!(read_messages_args(&a, &b, None).len(), 5);
    let args = read_messages_args(&a, &b, Some(640));
    assert_eq!(args.last().map(String::as_str), Some("640"));
  }

  #[test]
  fn conversation_paging_is_positional() {
    let a = SubscriberId::from([1; 32]);
    let args = list_conversations_args(&a, 0, 20);
    assert_eq!(&args[4..], ["0", "20"]);
  }
}
