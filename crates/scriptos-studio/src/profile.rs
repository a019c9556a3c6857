//! Creator profile, co-pilot chat and stored automation flows.

use scriptos_core::{
    AutomationFlow, ChannelIdentity, ChatMessage, CoreError, NodePosition, NodeType, UserProfile,
};
use scriptos_gemini::chat_greeting;

use crate::error::StudioError;
use crate::studio::Studio;

impl Studio {
    /// The stored profile, or an empty one before the first save.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::Store`] if the store cannot be read.
    pub fn profile(&self) -> Result<UserProfile, StudioError> {
        Ok(self.store.get_user_profile()?.unwrap_or_default())
    }

    /// Replaces the brand identity, keeping the linked channel fields.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::Store`] if the store fails.
    pub fn set_identity(&self, identity: ChannelIdentity) -> Result<UserProfile, StudioError> {
        let mut profile = self.profile()?;
        profile.identity = identity;
        self.store.save_user_profile(&profile)?;
        tracing::info!(blank = profile.identity.is_blank(), "identity updated");
        Ok(profile)
    }

    /// Pulls the authenticated channel and its analytics into the stored
    /// profile. Identity is preserved.
    ///
    /// The token is used for this call only and never stored. When the
    /// analytics lookup fails the previous analytics are kept.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::Youtube`] if the token is blank or the channel
    /// lookup fails, or [`StudioError::Store`] if the store fails.
    pub async fn sync_profile(&self, access_token: &str) -> Result<UserProfile, StudioError> {
        let linked = self.youtube.fetch_my_channel(access_token).await?;
        let today = chrono::Utc::now().date_naive();
        let analytics = match self.youtube.fetch_my_analytics(access_token, today).await {
            Ok(analytics) => Some(analytics),
            Err(e) => {
                tracing::warn!(error = %e, "analytics sync failed; keeping previous analytics");
                None
            }
        };

        let mut profile = self.profile()?;
        profile.merge_channel(linked);
        if analytics.is_some() {
            profile.analytics = analytics;
        }
        self.store.save_user_profile(&profile)?;
        tracing::info!(
            channel = profile.channel_name.as_deref().unwrap_or("-"),
            "profile synced"
        );
        Ok(profile)
    }

    /// Opening line of a new co-pilot conversation.
    #[must_use]
    pub fn chat_greeting(&self) -> &'static str {
        chat_greeting(self.language)
    }

    /// One co-pilot reply to `message`, given the conversation so far.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::Gemini`] when no generative API key is
    /// configured, or [`StudioError::Store`] if the profile cannot be read.
    pub async fn chat(
        &self,
        history: &[ChatMessage],
        message: &str,
    ) -> Result<String, StudioError> {
        self.gemini.ensure_api_key()?;
        let identity = self.persona()?;
        Ok(self
            .gemini
            .chat(history, message, self.language, identity.as_ref())
            .await)
    }

    /// # Errors
    ///
    /// Returns [`StudioError::Store`] if the store cannot be read.
    pub fn flows(&self) -> Result<Vec<AutomationFlow>, StudioError> {
        Ok(self.store.get_flows()?)
    }

    /// # Errors
    ///
    /// Returns [`StudioError::FlowNotFound`] for an unknown id, or
    /// [`StudioError::Store`] if the store cannot be read.
    pub fn flow(&self, id: &str) -> Result<AutomationFlow, StudioError> {
        self.flows()?
            .into_iter()
            .find(|f| f.id == id)
            .ok_or_else(|| StudioError::FlowNotFound(id.to_string()))
    }

    /// Upserts a flow by id after checking its edges.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::InvalidFlow`] when a node id repeats or an edge
    /// points outside the flow, or [`StudioError::Store`] if the store fails.
    pub fn save_flow(&self, flow: &AutomationFlow) -> Result<(), StudioError> {
        flow.check_edges()?;
        self.store.save_flow(flow)?;
        tracing::debug!(flow_id = %flow.id, nodes = flow.nodes.len(), "flow saved");
        Ok(())
    }

    /// Appends an idle node to a stored flow.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::FlowNotFound`] for an unknown flow, or
    /// [`StudioError::Store`] if the store fails.
    pub fn add_flow_node(
        &self,
        flow_id: &str,
        kind: NodeType,
        label: &str,
        position: NodePosition,
    ) -> Result<AutomationFlow, StudioError> {
        self.edit_flow(flow_id, |flow| {
            flow.add_node(kind, label, position);
            Ok(())
        })
    }

    /// Connects two nodes of a stored flow.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::FlowNotFound`] for an unknown flow,
    /// [`StudioError::InvalidFlow`] if either node is missing, or
    /// [`StudioError::Store`] if the store fails.
    pub fn connect_flow_nodes(
        &self,
        flow_id: &str,
        source: &str,
        target: &str,
    ) -> Result<AutomationFlow, StudioError> {
        self.edit_flow(flow_id, |flow| flow.connect(source, target).map(|_| ()))
    }

    /// Removes a node and its edges from a stored flow.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::FlowNotFound`] for an unknown flow,
    /// [`StudioError::InvalidFlow`] if the node is missing, or
    /// [`StudioError::Store`] if the store fails.
    pub fn remove_flow_node(
        &self,
        flow_id: &str,
        node_id: &str,
    ) -> Result<AutomationFlow, StudioError> {
        self.edit_flow(flow_id, |flow| {
            if flow.remove_node(node_id) {
                Ok(())
            } else {
                Err(CoreError::UnknownNode(node_id.to_string()))
            }
        })
    }

    fn edit_flow(
        &self,
        flow_id: &str,
        edit: impl FnOnce(&mut AutomationFlow) -> Result<(), CoreError>,
    ) -> Result<AutomationFlow, StudioError> {
        let mut flow = self.flow(flow_id)?;
        edit(&mut flow)?;
        self.save_flow(&flow)?;
        Ok(flow)
    }
}
