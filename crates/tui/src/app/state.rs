use super::*;
use agenda_client::LogoFile;

pub struct App {
    pub should_quit: bool,
    pub config: Config,
    pub api: AgendaApi,
    /// `None` while a submission or lookup task owns it.
    pub controller: Option<Box<Controller>>,
    pub busy: Option<BusyTask>,
    pub editor: EditorState,
    pub logo_input: InputState,
    pub company_input: InputState,
    pub focus: Focus,
    pub layout: LayoutState,
    pub keybinds: Keybinds,
    pub submit_state: SubmitState,
    pub logo_preview: LogoPreview,
    /// A picked file that finished reading while a task held the controller.
    pub pending_logo: Option<LogoFile>,
    pub suggestion: Option<String>,
    pub download: Option<DownloadNote>,
    pub notices: VecDeque<Notice>,
    pub pending_confirm: Option<PendingConfirm>,
    pub show_help: bool,
    pub last_error: Option<String>,
    pub show_error_details: bool,
    pub page_tx: mpsc::UnboundedSender<PageEvent>,
    pub page_rx: mpsc::UnboundedReceiver<PageEvent>,
    pub app_async_tx: mpsc::UnboundedSender<AppAsyncEvent>,
    pub app_async_rx: mpsc::UnboundedReceiver<AppAsyncEvent>,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let api = AgendaApi::new(&config.server.base_url, config.server.request_timeout())?;
        let downloads = config.downloads.resolve_dir();
        let controller = DocumentController::new(api.clone(), downloads);
        let (page_tx, page_rx) = mpsc::unbounded_channel();
        let (app_async_tx, app_async_rx) = mpsc::unbounded_channel();
        let starter = serde_json::to_string_pretty(&Agenda::sample())?;

        Ok(Self {
            should_quit: false,
            config,
            api,
            controller: Some(Box::new(controller)),
            busy: None,
            editor: EditorState::new(&starter),
            logo_input: InputState::new(),
            company_input: InputState::new(),
            focus: Focus::Editor,
            layout: LayoutState::default(),
            keybinds: Keybinds,
            submit_state: SubmitState::Idle,
            logo_preview: LogoPreview::Empty,
            pending_logo: None,
            suggestion: None,
            download: None,
            notices: VecDeque::new(),
            pending_confirm: None,
            show_help: false,
            last_error: None,
            show_error_details: false,
            page_tx,
            page_rx,
            app_async_tx,
            app_async_rx,
        })
    }

    /// The generate control is usable only when idle and no task holds the controller.
    pub fn can_submit(&self) -> bool {
        !self.submit_state.is_disabled() && self.controller.is_some()
    }

    pub fn surface(&self) -> ChannelSurface {
        ChannelSurface::new(self.editor.text(), self.page_tx.clone())
    }
}
