use serde::{Deserialize, Serialize};

// History rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub adjective: String,
    pub verb: String,
    pub noun: String,
}

impl HistoryEntry {
    pub fn new(adjective: &str, verb: &str, noun: &str) -> Self {
        Self {
            adjective: adjective.to_string(),
            verb: verb.to_string(),
            noun: noun.to_string(),
        }
    }

    /// "adjective, verb, noun", the form fed back into the template.
    pub fn joined(&self) -> String {
        format!("{}, {}, {}", self.adjective, self.verb, self.noun)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedTriple {
    pub personality_trait: String,
    pub hobby: String,
    pub object: String,
}

impl GeneratedTriple {
    pub fn into_array(self) -> [String; 3] {
        [self.personality_trait, self.hobby, self.object]
    }
}

// Function-call arguments produced by the model
#[derive(Deserialize, Debug)]
pub struct TripleArguments {
    pub personality_trait: String,
    pub hobby: String,
    pub object: String,
}

impl From<TripleArguments> for GeneratedTriple {
    fn from(args: TripleArguments) -> Self {
        Self {
            personality_trait: args.personality_trait,
            hobby: args.hobby,
            object: args.object,
        }
    }
}

// Chat completion response, only the parts we read
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct ChatCompletion {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct ResponseMessage {
    #[serde(default)]
    pub function_call: Option<FunctionCall>,
    #[serde(default)]
    pub tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct FunctionCall {
    #[serde(default)]
    pub name: Option<String>,
    pub arguments: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ToolCall {
    pub function: FunctionCall,
}

impl ChatCompletion {
    /// Arguments of the first choice's function call, or of its first tool call.
    pub fn function_arguments(&self) -> Option<&str> {
        let message = &self.choices.first()?.message;
        if let Some(call) = &message.function_call {
            return Some(call.arguments.as_str());
        }
        message
            .tool_calls
            .as_ref()?
            .first()
            .map(|tool| tool.function.arguments.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_call_arguments() {
        let completion: ChatCompletion = serde_json::from_str(
            r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":null,
                "function_call":{"name":"pick_prompt","arguments":"{\"hobby\":\"draw\"}"}}}]}"#,
        )
        .unwrap();
        assert_eq!(completion.function_arguments(), Some(r#"{"hobby":"draw"}"#));
    }

    #[test]
    fn test_tool_call_arguments() {
        let completion: ChatCompletion = serde_json::from_str(
            r#"{"choices":[{"message":{"tool_calls":[{"id":"call_1","type":"function",
                "function":{"name":"pick_prompt","arguments":"{}"}}]}}]}"#,
        )
        .unwrap();
        assert_eq!(completion.function_arguments(), Some("{}"));
    }

    #[test]
    fn test_missing_call() {
        let completion: ChatCompletion =
            serde_json::from_str(r#"{"choices":[{"message":{"content":"hi"}}]}"#).unwrap();
        assert_eq!(completion.function_arguments(), None);
        assert_eq!(ChatCompletion::default().function_arguments(), None);
    }

    #[test]
    fn test_history_entry_joined() {
        assert_eq!(HistoryEntry::new("brave", "run", "cat").joined(), "brave, run, cat");
    }
}
