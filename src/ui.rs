pub fn render_index(started: bool) -> String {
    INDEX_HTML.replace("{{STARTED}}", if started { "true" } else { "false" })
}

const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Reading Plan</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f6f1e7;
      --bg-2: #cfe0d8;
      --ink: #27302c;
      --accent: #2d7a4b;
      --accent-2: #2f4858;
      --danger: #c63b2b;
      --card: rgba(255, 255, 255, 0.88);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #e8f0e9 60%, #f4f0e6 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(720px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 24px;
      animation: rise 600ms ease;
    }

    header {
      display: flex;
      align-items: baseline;
      justify-content: space-between;
      gap: 12px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(1.8rem, 4vw, 2.4rem);
      margin: 0;
    }

    h2 {
      margin: 0 0 4px;
      font-size: 1.2rem;
    }

    .subtitle {
      margin: 0;
      color: #5f655f;
      font-size: 1rem;
    }

    .hidden {
      display: none !important;
    }

    .screen {
      display: grid;
      gap: 20px;
    }

    .card {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 10px;
    }

    .stat-grid {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(140px, 1fr));
      gap: 14px;
    }

    .stat .label {
      display: block;
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #868d86;
    }

    .stat .value {
      display: block;
      font-size: 1.5rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .day-heading {
      display: flex;
      align-items: center;
      justify-content: space-between;
      gap: 12px;
      flex-wrap: wrap;
    }

    .streak-badge {
      display: none;
      background: rgba(45, 122, 75, 0.12);
      color: var(--accent);
      border-radius: 999px;
      padding: 6px 14px;
      font-weight: 600;
      font-size: 0.9rem;
    }

    .streak-badge.visible {
      display: inline-block;
    }

    ul.readings {
      margin: 0;
      padding-left: 22px;
      display: grid;
      gap: 8px;
      font-size: 1.05rem;
    }

    .progress-track {
      height: 10px;
      border-radius: 999px;
      background: rgba(47, 72, 88, 0.12);
      overflow: hidden;
    }

    .progress-fill {
      height: 100%;
      width: 0;
      border-radius: 999px;
      background: var(--accent);
      transition: width 300ms ease;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 14px 20px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      transition: transform 150ms ease, box-shadow 150ms ease;
      display: inline-flex;
      align-items: center;
      justify-content: center;
      gap: 8px;
    }

    button:active {
      transform: scale(0.98);
    }

    button:disabled {
      opacity: 0.45;
      cursor: default;
    }

    .btn-primary {
      background: var(--accent);
      color: white;
      box-shadow: 0 10px 24px rgba(45, 122, 75, 0.3);
    }

    .btn-secondary {
      background: var(--accent-2);
      color: white;
    }

    .btn-ghost {
      background: rgba(47, 72, 88, 0.08);
      color: var(--accent-2);
      padding: 10px 16px;
    }

    .btn-danger {
      background: var(--danger);
      color: white;
    }

    .nav-row {
      display: grid;
      grid-template-columns: 1fr auto 1fr;
      gap: 10px;
    }

    .completed-message {
      display: none;
      text-align: center;
      font-weight: 600;
      color: var(--accent);
      font-size: 1.1rem;
    }

    .completed-message.visible {
      display: block;
      animation: pop 400ms ease;
    }

    input[type="date"],
    input[type="time"],
    textarea {
      width: 100%;
      border: 1px solid rgba(47, 72, 88, 0.2);
      border-radius: 12px;
      padding: 12px;
      font-size: 1rem;
      font-family: inherit;
    }

    textarea {
      resize: vertical;
      min-height: 64px;
      word-break: break-all;
    }

    .token-box {
      font-family: ui-monospace, monospace;
      font-size: 0.85rem;
      background: rgba(47, 72, 88, 0.06);
      border-radius: 12px;
      padding: 12px;
      word-break: break-all;
    }

    .row {
      display: flex;
      gap: 10px;
      flex-wrap: wrap;
    }

    .status {
      font-size: 0.95rem;
      color: #6b7069;
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: var(--danger);
    }

    .status[data-type="ok"] {
      color: var(--accent);
    }

    .hint {
      margin: 0;
      color: #6f746e;
      font-size: 0.9rem;
    }

    @keyframes rise {
      from {
        opacity: 0;
        transform: translateY(18px);
      }
      to {
        opacity: 1;
        transform: translateY(0);
      }
    }

    @keyframes pop {
      0% {
        transform: scale(0.9);
      }
      60% {
        transform: scale(1.05);
      }
      100% {
        transform: scale(1);
      }
    }

    @media (max-width: 600px) {
      .app {
        padding: 28px 22px;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Reading Plan</h1>
      <button class="btn-ghost hidden" id="settings-toggle" type="button">Settings</button>
    </header>

    <section class="screen hidden" id="setup-screen">
      <div class="card">
        <h2>Start your 365-day plan</h2>
        <p class="subtitle">Pick the day you want to begin. Day 1 is your start date.</p>
        <input type="date" id="start-date" />
        <button class="btn-primary" id="start-btn" type="button">Start reading</button>
      </div>
      <p class="hint">Have progress on another device? Open the sync link there and it imports here automatically, or paste it below.</p>
      <div class="card">
        <h2>Import progress</h2>
        <textarea id="setup-import-input" placeholder="Paste a sync link or code"></textarea>
        <button class="btn-secondary" id="setup-import-btn" type="button">Preview import</button>
      </div>
    </section>

    <section class="screen hidden" id="reading-screen">
      <div class="day-heading">
        <div>
          <h2 id="day-display">Day 1 of 365</h2>
          <p class="subtitle" id="date-display"></p>
        </div>
        <span class="streak-badge" id="streak-display"></span>
      </div>

      <div class="card">
        <ul class="readings" id="readings-list"></ul>
      </div>

      <div id="completion-section">
        <button class="btn-primary" id="complete-btn" type="button" style="width: 100%">Mark as read</button>
      </div>
      <div class="completed-message" id="completed-message">Completed &#10003;</div>

      <div class="nav-row">
        <button class="btn-ghost" id="prev-day" type="button">&#8592; Previous</button>
        <button class="btn-ghost" id="today-btn" type="button">Today</button>
        <button class="btn-ghost" id="next-day" type="button">Next &#8594;</button>
      </div>

      <div>
        <div class="progress-track"><div class="progress-fill" id="main-progress-fill"></div></div>
        <p class="hint" id="main-progress-text"></p>
      </div>
    </section>

    <section class="screen hidden" id="settings-screen">
      <button class="btn-ghost" id="back-btn" type="button" style="justify-self: start">&#8592; Back</button>

      <div class="card">
        <h2>Progress</h2>
        <div class="stat-grid">
          <div class="stat"><span class="label">Days read</span><span class="value" id="days-completed">0</span></div>
          <div class="stat"><span class="label">Streak</span><span class="value" id="current-streak">0</span></div>
          <div class="stat"><span class="label">Complete</span><span class="value" id="progress-percent">0%</span></div>
        </div>
        <div class="progress-track"><div class="progress-fill" id="progress-fill"></div></div>
        <p class="hint" id="missed-days-text"></p>
      </div>

      <div class="card">
        <h2>Sync to another device</h2>
        <p class="subtitle">The link encodes your whole progress. Nothing leaves your devices.</p>
        <div class="row">
          <button class="btn-secondary" id="export-btn" type="button">Create sync link</button>
          <button class="btn-ghost hidden" id="copy-btn" type="button">Copy</button>
          <button class="btn-ghost hidden" id="share-btn" type="button">Share</button>
        </div>
        <div class="token-box hidden" id="sync-link"></div>
        <textarea id="import-input" placeholder="Paste a sync link or code from another device"></textarea>
        <button class="btn-secondary" id="import-btn" type="button">Preview import</button>
      </div>

      <div class="card">
        <h2>Daily reminder</h2>
        <p class="subtitle">Download a calendar file with a daily reminder for all 365 days.</p>
        <input type="time" id="reminder-time" value="08:00" />
        <button class="btn-secondary" id="set-reminder-btn" type="button">Download calendar file</button>
      </div>

      <div class="card">
        <h2>Reset</h2>
        <p class="subtitle">Clears your start date and every completed day on this device.</p>
        <button class="btn-danger" id="reset-btn" type="button">Reset plan</button>
      </div>
    </section>

    <div class="status" id="status"></div>
  </main>

  <script>
    const initiallyStarted = {{STARTED}};

    const el = (id) => document.getElementById(id);
    const statusEl = el('status');

    let viewDay = null;
    let todayDay = null;
    let totalDays = 365;

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const flashStatus = (message, type) => {
      setStatus(message, type);
      setTimeout(() => setStatus('', ''), 2000);
    };

    const showScreen = (id) => {
      document.querySelectorAll('.screen').forEach((s) => s.classList.add('hidden'));
      el(id).classList.remove('hidden');
      el('settings-toggle').classList.toggle('hidden', id !== 'reading-screen');
    };

    const api = async (path, options) => {
      const res = await fetch(path, options);
      if (!res.ok) {
        throw new Error((await res.text()) || 'Request failed');
      }
      return res.json();
    };

    const post = (path, body) =>
      api(path, {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(body || {})
      });

    const renderProgress = (completed, percent) => {
      el('main-progress-fill').style.width = percent + '%';
      el('main-progress-text').textContent = completed + '/' + totalDays + ' days (' + percent + '%)';
    };

    const renderStreak = (streak) => {
      const badge = el('streak-display');
      if (streak > 0) {
        badge.textContent = streak + ' day streak';
        badge.classList.add('visible');
      } else {
        badge.classList.remove('visible');
      }
    };

    const renderReadings = (readings) => {
      const list = el('readings-list');
      list.innerHTML = '';
      readings.forEach((reading) => {
        const item = document.createElement('li');
        item.textContent = reading;
        list.appendChild(item);
      });
    };

    const renderCompletion = (completed) => {
      el('completion-section').style.display = completed ? 'none' : '';
      el('completed-message').classList.toggle('visible', completed);
    };

    const renderDay = (data) => {
      viewDay = data.day;
      el('day-display').textContent = 'Day ' + data.day + ' of ' + totalDays;
      const date = new Date(data.date + 'T00:00:00');
      let dateText = date.toLocaleDateString('en-US', { weekday: 'long', month: 'long', day: 'numeric' });
      if (data.is_today) {
        dateText = 'Today - ' + dateText;
      }
      el('date-display').textContent = dateText;
      renderReadings(data.readings);
      renderCompletion(data.completed);
      el('prev-day').disabled = data.day <= 1;
      el('next-day').disabled = data.day >= totalDays;
    };

    const renderToday = (data) => {
      todayDay = data.day;
      renderDay({
        day: data.day,
        date: data.date,
        readings: data.readings,
        completed: data.completed,
        is_today: true
      });
      renderStreak(data.current_streak);
      renderProgress(data.days_completed, data.percent);
    };

    const loadToday = async () => {
      const data = await api('/api/today');
      if (!data.started) {
        showScreen('setup-screen');
        return false;
      }
      renderToday(data);
      showScreen('reading-screen');
      return true;
    };

    const navigate = async (day) => {
      renderDay(await post('/api/view', { day }));
    };

    const completeViewedDay = async () => {
      const stats = await post('/api/complete', { day: viewDay });
      renderCompletion(true);
      renderStreak(stats.current_streak);
      renderProgress(stats.days_completed, stats.percent);
    };

    const loadSettings = async () => {
      const stats = await api('/api/stats');
      el('days-completed').textContent = stats.days_completed;
      el('current-streak').textContent = stats.current_streak;
      el('progress-percent').textContent = stats.percent + '%';
      el('progress-fill').style.width = stats.percent + '%';
      const missed = stats.missed_days;
      el('missed-days-text').textContent = missed.length
        ? 'Missed days: ' + missed.slice(0, 12).join(', ') + (missed.length > 12 ? ' and ' + (missed.length - 12) + ' more' : '')
        : 'No missed days so far.';
    };

    let syncUrl = null;

    const exportToken = async () => {
      const data = await api('/api/sync/export');
      syncUrl = location.origin + location.pathname + '#sync=' + data.token;
      el('sync-link').textContent = syncUrl;
      el('sync-link').classList.remove('hidden');
      el('copy-btn').classList.remove('hidden');
      if (navigator.share) {
        el('share-btn').classList.remove('hidden');
      }
    };

    const copyToken = async () => {
      if (!navigator.clipboard) {
        setStatus('Clipboard unavailable here - copy the link manually.', 'error');
        return;
      }
      try {
        await navigator.clipboard.writeText(syncUrl);
        flashStatus('Link copied', 'ok');
      } catch (err) {
        setStatus('Could not copy - copy the link manually.', 'error');
      }
    };

    const shareToken = async () => {
      try {
        await navigator.share({ title: 'Reading plan progress', url: syncUrl });
      } catch (err) {
        // Dismissing the share sheet is not an error.
        if (err.name !== 'AbortError') {
          setStatus('Sharing failed - copy the link instead.', 'error');
        }
      }
    };

    const previewAndImport = async (token) => {
      let preview;
      try {
        preview = await post('/api/sync/preview', { token });
      } catch (err) {
        setStatus(err.message, 'error');
        return;
      }
      const message =
        'Import progress? This replaces everything on this device.\n\n' +
        'Start date: ' + preview.start_date + '\n' +
        'Days completed: ' + preview.days_completed;
      if (!confirm(message)) {
        return;
      }
      await post('/api/sync/import', { token });
      await loadToday();
      flashStatus('Progress imported', 'ok');
    };

    const handleStart = async () => {
      const value = el('start-date').value;
      if (!value) {
        setStatus('Please select a start date.', 'error');
        return;
      }
      await post('/api/start', { start_date: value });
      await loadToday();
    };

    const handleReset = async () => {
      if (!confirm('Are you sure you want to reset? All your progress will be lost.')) {
        return;
      }
      await post('/api/reset');
      showScreen('setup-screen');
    };

    const downloadReminder = () => {
      const time = el('reminder-time').value || '08:00';
      location.href = '/api/reminder.ics?time=' + encodeURIComponent(time);
    };

    const guard = (fn) => () => fn().catch((err) => setStatus(err.message, 'error'));

    el('start-btn').addEventListener('click', guard(handleStart));
    el('complete-btn').addEventListener('click', guard(completeViewedDay));
    el('prev-day').addEventListener('click', guard(() => navigate(viewDay - 1)));
    el('next-day').addEventListener('click', guard(() => navigate(viewDay + 1)));
    el('today-btn').addEventListener('click', guard(async () => {
      await loadToday();
    }));
    el('settings-toggle').addEventListener('click', guard(async () => {
      showScreen('settings-screen');
      await loadSettings();
    }));
    el('back-btn').addEventListener('click', guard(loadToday));
    el('export-btn').addEventListener('click', guard(exportToken));
    el('copy-btn').addEventListener('click', guard(copyToken));
    el('share-btn').addEventListener('click', guard(shareToken));
    el('import-btn').addEventListener('click', guard(() => previewAndImport(el('import-input').value)));
    el('setup-import-btn').addEventListener('click', guard(() => previewAndImport(el('setup-import-input').value)));
    el('reset-btn').addEventListener('click', guard(handleReset));
    el('set-reminder-btn').addEventListener('click', downloadReminder);

    const init = async () => {
      // Grab the sync fragment once and clear it from the address bar so a
      // refresh cannot re-trigger the import prompt.
      let pendingToken = null;
      if (location.hash.startsWith('#sync=')) {
        pendingToken = location.hash.slice('#sync='.length);
        history.replaceState(null, '', location.pathname + location.search);
      }

      const tomorrow = new Date();
      tomorrow.setDate(tomorrow.getDate() + 1);
      el('start-date').value = tomorrow.toISOString().slice(0, 10);

      if (initiallyStarted) {
        await loadToday();
      } else {
        showScreen('setup-screen');
      }

      if (pendingToken) {
        await previewAndImport(pendingToken);
      }
    };

    init().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"##;
