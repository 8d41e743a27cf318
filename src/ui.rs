use crate::models::{SummaryResponse, Transaction};

pub fn render_index(summary: &SummaryResponse) -> String {
    let rows: String = summary.daily_transactions.iter().map(render_row).collect();
    let empty_hidden = if summary.daily_transactions.is_empty() { "" } else { "hidden" };
    let warning_hidden = if summary.show_warning { "" } else { "hidden" };

    INDEX_HTML
        .replace("{{SALES_TODAY}}", &format_currency(summary.total_sales_today))
        .replace("{{ITEMS_TODAY}}", &summary.total_items_today.to_string())
        .replace("{{SALES_WEEK}}", &format_currency(summary.total_sales_this_week))
        .replace("{{TARGET}}", &format_currency(summary.weekly_target))
        .replace("{{REMAINING}}", &format_currency(summary.remaining_to_target))
        .replace("{{WARNING_HIDDEN}}", warning_hidden)
        .replace("{{EMPTY_HIDDEN}}", empty_hidden)
        .replace("{{ROWS}}", &rows)
}

fn render_row(tx: &Transaction) -> String {
    format!(
        r#"<li class="row" data-id="{id}">
          <div><span class="row-name">{name}</span><span class="row-meta">{quantity} x {price}</span></div>
          <span class="row-total">{total}</span>
          <form method="post" action="/transactions/{id}/delete" class="row-delete">
            <button type="submit" class="btn-ghost" data-delete="{id}">Delete</button>
          </form>
        </li>"#,
        id = tx.id,
        name = escape_html(&tx.name),
        quantity = tx.quantity,
        price = format_currency(tx.price),
        total = format_currency(tx.total()),
    )
}

/// Whole-unit amount with comma-grouped thousands, e.g. `9000000.4` becomes
/// `9,000,000`.
pub fn format_currency(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        grouped.push('-');
    }
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Sales Ledger</title>
  <style>
    :root {
      --bg: #f4f1ea;
      --ink: #26313a;
      --muted: #7a746d;
      --accent: #2f7a5b;
      --danger: #c63b2b;
      --card: #ffffff;
      --shadow: 0 20px 50px rgba(38, 49, 58, 0.14);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: start center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(860px, 100%);
      background: var(--card);
      border-radius: 24px;
      box-shadow: var(--shadow);
      padding: 32px;
      display: grid;
      gap: 24px;
    }

    h1 {
      margin: 0;
      font-size: clamp(1.8rem, 4vw, 2.4rem);
    }

    h2 {
      margin: 0 0 12px;
      font-size: 1.2rem;
    }

    .subtitle {
      margin: 6px 0 0;
      color: var(--muted);
    }

    .warning {
      background: #fdecea;
      color: var(--danger);
      border-radius: 14px;
      padding: 14px 18px;
      font-weight: 600;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 16px;
    }

    .stat {
      border-radius: 16px;
      padding: 16px;
      border: 1px solid rgba(38, 49, 58, 0.1);
      display: grid;
      gap: 6px;
    }

    .stat .label {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: var(--muted);
    }

    .stat .value {
      font-size: 1.5rem;
      font-weight: 600;
    }

    form.entry {
      display: grid;
      grid-template-columns: 2fr 1fr 1fr auto;
      gap: 10px;
    }

    input {
      padding: 12px 14px;
      border-radius: 12px;
      border: 1px solid rgba(38, 49, 58, 0.2);
      font-size: 1rem;
    }

    button {
      border: none;
      border-radius: 999px;
      padding: 12px 18px;
      font-size: 0.95rem;
      font-weight: 600;
      cursor: pointer;
    }

    .btn-add {
      background: var(--accent);
      color: white;
    }

    .btn-clear {
      background: var(--danger);
      color: white;
    }

    .btn-ghost {
      background: transparent;
      color: var(--danger);
      padding: 6px 10px;
    }

    ul.rows {
      list-style: none;
      margin: 0;
      padding: 0;
      display: grid;
      gap: 8px;
    }

    .row {
      display: grid;
      grid-template-columns: 1fr auto auto;
      align-items: center;
      gap: 12px;
      padding: 10px 14px;
      border-radius: 12px;
      border: 1px solid rgba(38, 49, 58, 0.08);
    }

    .row-name {
      font-weight: 600;
      display: block;
    }

    .row-meta {
      color: var(--muted);
      font-size: 0.85rem;
    }

    .row-delete {
      margin: 0;
    }

    .week {
      display: grid;
      gap: 6px;
    }

    .bar {
      display: grid;
      grid-template-columns: 110px 1fr 120px;
      align-items: center;
      gap: 10px;
      font-size: 0.9rem;
    }

    .bar-fill {
      height: 10px;
      border-radius: 999px;
      background: var(--accent);
    }

    .status {
      min-height: 1.2em;
      color: var(--muted);
    }

    .status[data-type="error"] {
      color: var(--danger);
    }

    @media (max-width: 600px) {
      form.entry {
        grid-template-columns: 1fr;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Sales Ledger</h1>
      <p class="subtitle">Record today's sales. Weeks run Saturday to Friday.</p>
    </header>

    <div id="warning" class="warning" {{WARNING_HIDDEN}}>
      Weekly sales are behind the <span id="target">{{TARGET}}</span> target:
      <span id="remaining">{{REMAINING}}</span> still to go.
    </div>

    <section class="panel">
      <div class="stat">
        <span class="label">Sales today</span>
        <span id="sales-today" class="value">{{SALES_TODAY}}</span>
      </div>
      <div class="stat">
        <span class="label">Items today</span>
        <span id="items-today" class="value">{{ITEMS_TODAY}}</span>
      </div>
      <div class="stat">
        <span class="label">Sales this week</span>
        <span id="sales-week" class="value">{{SALES_WEEK}}</span>
      </div>
    </section>

    <form id="entry-form" class="entry" method="post" action="/transactions/add">
      <input name="name" placeholder="Product" required />
      <input name="quantity" type="number" min="1" step="1" value="1" required />
      <input name="price" type="number" min="1" step="any" placeholder="Price" required />
      <button class="btn-add" type="submit">Add sale</button>
    </form>

    <section>
      <h2>Today's sales</h2>
      <p id="empty" class="subtitle" {{EMPTY_HIDDEN}}>No sales recorded today.</p>
      <ul id="rows" class="rows">{{ROWS}}</ul>
    </section>

    <section>
      <h2>This week</h2>
      <div id="week" class="week"></div>
    </section>

    <form id="clear-form" method="post" action="/transactions/clear-today">
      <label class="subtitle"><input type="checkbox" name="confirmed" value="true" /> I'm sure</label>
      <button class="btn-clear" type="submit">Clear today's sales</button>
    </form>

    <div class="status" id="status"></div>
  </main>

  <script>
    const money = new Intl.NumberFormat(undefined, { maximumFractionDigits: 0 });
    const fmt = (value) => money.format(Math.round(value));

    const statusEl = document.getElementById('status');
    const rowsEl = document.getElementById('rows');
    const emptyEl = document.getElementById('empty');
    const weekEl = document.getElementById('week');
    const warningEl = document.getElementById('warning');
    const entryForm = document.getElementById('entry-form');
    const clearForm = document.getElementById('clear-form');

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const renderRows = (transactions) => {
      rowsEl.replaceChildren();
      transactions.forEach((tx) => {
        const li = document.createElement('li');
        li.className = 'row';
        li.dataset.id = tx.id;

        const info = document.createElement('div');
        const name = document.createElement('span');
        name.className = 'row-name';
        name.textContent = tx.name;
        const meta = document.createElement('span');
        meta.className = 'row-meta';
        meta.textContent = `${tx.quantity} x ${fmt(tx.price)}`;
        info.append(name, meta);

        const total = document.createElement('span');
        total.className = 'row-total';
        total.textContent = fmt(tx.quantity * tx.price);

        const del = document.createElement('button');
        del.type = 'button';
        del.className = 'btn-ghost';
        del.textContent = 'Delete';
        del.addEventListener('click', () => {
          remove(tx.id).catch((err) => setStatus(err.message, 'error'));
        });

        li.append(info, total, del);
        rowsEl.append(li);
      });
      emptyEl.hidden = transactions.length > 0;
    };

    const renderWeek = (days) => {
      const max = Math.max(1, ...days.map((day) => day.sales));
      weekEl.replaceChildren();
      days.forEach((day) => {
        const row = document.createElement('div');
        row.className = 'bar';
        const label = document.createElement('span');
        label.textContent = day.date;
        const track = document.createElement('div');
        const fill = document.createElement('div');
        fill.className = 'bar-fill';
        fill.style.width = `${(day.sales / max) * 100}%`;
        track.append(fill);
        const value = document.createElement('span');
        value.textContent = fmt(day.sales);
        row.append(label, track, value);
        weekEl.append(row);
      });
    };

    const render = (summary) => {
      document.getElementById('sales-today').textContent = fmt(summary.total_sales_today);
      document.getElementById('items-today').textContent = summary.total_items_today;
      document.getElementById('sales-week').textContent = fmt(summary.total_sales_this_week);
      document.getElementById('target').textContent = fmt(summary.weekly_target);
      document.getElementById('remaining').textContent = fmt(summary.remaining_to_target);
      warningEl.hidden = !summary.show_warning;
      renderRows(summary.daily_transactions);
      renderWeek(summary.week_days);
    };

    const request = async (url, options) => {
      const res = await fetch(url, options);
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }
      return res.json();
    };

    const remove = async (id) => {
      render(await request(`/api/transactions/${id}`, { method: 'DELETE' }));
    };

    entryForm.addEventListener('submit', (event) => {
      event.preventDefault();
      const data = new FormData(entryForm);
      const body = {
        name: String(data.get('name') || ''),
        quantity: Number.parseInt(data.get('quantity'), 10) || 0,
        price: Number.parseFloat(data.get('price')) || 0
      };
      request('/api/transactions', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(body)
      })
        .then((res) => {
          render(res.summary);
          if (res.added) {
            entryForm.reset();
            setStatus('Saved', 'ok');
          } else {
            setStatus('Enter a product, a quantity and a price above zero.', 'error');
          }
        })
        .catch((err) => setStatus(err.message, 'error'));
    });

    clearForm.addEventListener('submit', (event) => {
      event.preventDefault();
      if (!window.confirm("Delete all of today's sales? Earlier days are kept.")) {
        return;
      }
      request('/api/transactions/clear-today', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ confirmed: true })
      })
        .then((res) => {
          render(res.summary);
          setStatus(`Removed ${res.removed} sales`, 'ok');
        })
        .catch((err) => setStatus(err.message, 'error'));
    });

    request('/api/summary')
      .then(render)
      .catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
